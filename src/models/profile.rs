use serde::{Deserialize, Serialize};

use super::exercise::DifficultyLevel;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub user_id: String,
  pub name: String,
  pub age: u32,
  /// cm
  pub height: f64,
  /// kg
  pub weight: f64,
  /// 0 = beginner, 1 = intermediate, 2 = advanced
  pub level: u8,
  #[serde(default)]
  pub place: Vec<String>,
  #[serde(default)]
  pub goal: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
  Underweight,
  Normal,
  Overweight,
  Obese,
  SeverelyObese,
}

impl BmiCategory {
  pub fn from_bmi(bmi: f64) -> Self {
    match bmi {
      b if b < 18.5 => BmiCategory::Underweight,
      b if b < 23.0 => BmiCategory::Normal,
      b if b < 25.0 => BmiCategory::Overweight,
      b if b < 30.0 => BmiCategory::Obese,
      _ => BmiCategory::SeverelyObese,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      BmiCategory::Underweight => "저체중",
      BmiCategory::Normal => "정상",
      BmiCategory::Overweight => "과체중",
      BmiCategory::Obese => "비만",
      BmiCategory::SeverelyObese => "고도비만",
    }
  }
}

/// weight / height_m^2, or 0 when either input is not positive
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
  if height_cm <= 0.0 || weight_kg <= 0.0 {
    return 0.0;
  }
  let height_m = height_cm / 100.0;
  weight_kg / (height_m * height_m)
}

/// Standard weight: height_m^2 x 22
pub fn ideal_weight(height_cm: f64) -> f64 {
  if height_cm <= 0.0 {
    return 0.0;
  }
  let height_m = height_cm / 100.0;
  height_m * height_m * 22.0
}

impl UserProfile {
  pub fn bmi(&self) -> f64 {
    calculate_bmi(self.height, self.weight)
  }

  pub fn bmi_category(&self) -> BmiCategory {
    BmiCategory::from_bmi(self.bmi())
  }

  pub fn ideal_weight(&self) -> f64 {
    ideal_weight(self.height)
  }

  /// Map the stored ordinal onto a difficulty; anything above 2 counts as advanced
  pub fn difficulty(&self) -> DifficultyLevel {
    match self.level {
      0 => DifficultyLevel::Beginner,
      1 => DifficultyLevel::Intermediate,
      _ => DifficultyLevel::Advanced,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::test_utils::mock_profile;

  #[test]
  fn test_bmi_and_category() {
    let profile = mock_profile();
    // 70 / 1.75^2
    assert_approx_eq!(profile.bmi(), 22.857, 0.001);
    assert_eq!(profile.bmi_category(), BmiCategory::Normal);
  }

  #[test]
  fn test_bmi_thresholds() {
    assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
    assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
    assert_eq!(BmiCategory::from_bmi(23.0), BmiCategory::Overweight);
    assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Obese);
    assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::SeverelyObese);
  }

  #[test]
  fn test_bmi_invalid_inputs() {
    assert_eq!(calculate_bmi(0.0, 70.0), 0.0);
    assert_eq!(calculate_bmi(175.0, -1.0), 0.0);
    assert_eq!(ideal_weight(0.0), 0.0);
    assert_approx_eq!(ideal_weight(180.0), 71.28, 0.001);
  }

  #[test]
  fn test_level_ordinal_maps_to_difficulty() {
    let mut profile = mock_profile();
    profile.level = 0;
    assert_eq!(profile.difficulty(), DifficultyLevel::Beginner);
    profile.level = 2;
    assert_eq!(profile.difficulty(), DifficultyLevel::Advanced);
    profile.level = 9;
    assert_eq!(profile.difficulty(), DifficultyLevel::Advanced);
  }
}
