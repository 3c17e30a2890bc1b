use serde::Serialize;

use crate::db::AppState;
use crate::models::{BmiCategory, UserProfile};
use crate::store::{StoreError, StoreResult};

/// Derived body figures shown on the profile screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyStats {
  pub bmi: f64,
  pub bmi_category: BmiCategory,
  pub bmi_label: &'static str,
  pub ideal_weight: f64,
}

impl BodyStats {
  pub fn from_profile(profile: &UserProfile) -> Self {
    let bmi_category = profile.bmi_category();
    Self {
      bmi: profile.bmi(),
      bmi_category,
      bmi_label: bmi_category.label(),
      ideal_weight: profile.ideal_weight(),
    }
  }
}

pub async fn get_profile(state: &AppState, user_id: &str) -> StoreResult<UserProfile> {
  state
    .profiles
    .get(user_id)
    .await?
    .ok_or_else(|| StoreError::not_found("profile", user_id))
}

pub async fn save_profile(state: &AppState, profile: UserProfile) -> StoreResult<()> {
  state.profiles.save(profile).await
}

pub async fn get_body_stats(state: &AppState, user_id: &str) -> StoreResult<BodyStats> {
  Ok(BodyStats::from_profile(&get_profile(state, user_id).await?))
}
