//! Exercise catalog
//!
//! The catalog is the read side every analytic and strategy resolves exercise
//! ids against. It is loaded once (from the database or the built-in list) and
//! then only read.

use std::collections::HashMap;

use crate::filter::ExerciseFilter;
use crate::models::{DifficultyLevel, Exercise, ExerciseCategory, ExerciseEffect};

/// Read access to exercise definitions
pub trait ExerciseCatalog {
  fn get_by_id(&self, id: &str) -> Option<&Exercise>;

  fn get_all(&self) -> Vec<Exercise>;

  fn search(&self, filter: &ExerciseFilter) -> Vec<Exercise>;

  fn get_effect(&self, id: &str) -> Option<ExerciseEffect> {
    self.get_by_id(id).map(|e| e.effect)
  }
}

/// Insertion-ordered, id-indexed catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
  exercises: Vec<Exercise>,
  index: HashMap<String, usize>,
}

impl InMemoryCatalog {
  pub fn new(exercises: Vec<Exercise>) -> Self {
    let mut catalog = Self::default();
    for exercise in exercises {
      catalog.add(exercise);
    }
    catalog
  }

  /// Built-in sample catalog
  pub fn with_defaults() -> Self {
    Self::new(default_exercises())
  }

  /// Adds `exercise` unless its id is already present. Returns whether it was added.
  pub fn add(&mut self, exercise: Exercise) -> bool {
    if self.index.contains_key(&exercise.id) {
      return false;
    }
    self.index.insert(exercise.id.clone(), self.exercises.len());
    self.exercises.push(exercise);
    true
  }

  pub fn by_category(&self, category: ExerciseCategory) -> Vec<Exercise> {
    self.search(&ExerciseFilter::Category(category))
  }

  pub fn by_difficulty(&self, difficulty: DifficultyLevel) -> Vec<Exercise> {
    self.search(&ExerciseFilter::Difficulty(difficulty))
  }

  /// Blank query returns the whole catalog
  pub fn search_text(&self, query: &str) -> Vec<Exercise> {
    if query.trim().is_empty() {
      return self.get_all();
    }
    self.search(&ExerciseFilter::SearchQuery(query.to_string()))
  }

  pub fn len(&self) -> usize {
    self.exercises.len()
  }

  pub fn is_empty(&self) -> bool {
    self.exercises.is_empty()
  }

  pub fn as_slice(&self) -> &[Exercise] {
    &self.exercises
  }
}

impl ExerciseCatalog for InMemoryCatalog {
  fn get_by_id(&self, id: &str) -> Option<&Exercise> {
    self.index.get(id).and_then(|&i| self.exercises.get(i))
  }

  fn get_all(&self) -> Vec<Exercise> {
    self.exercises.clone()
  }

  fn search(&self, filter: &ExerciseFilter) -> Vec<Exercise> {
    self.exercises.iter().filter(|e| filter.matches(e)).cloned().collect()
  }
}

/// ---------------------------------------------------------------------------
/// Built-in Exercises
/// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn exercise(
  id: &str,
  name: &str,
  category: ExerciseCategory,
  difficulty: DifficultyLevel,
  duration_minutes: u32,
  calories_per_session: u32,
  target_muscles: &[&str],
  description: &str,
  effect: ExerciseEffect,
) -> Exercise {
  Exercise {
    id: id.to_string(),
    name: name.to_string(),
    category,
    difficulty,
    duration_minutes,
    calories_per_session,
    target_muscles: target_muscles.iter().map(|m| m.to_string()).collect(),
    description: description.to_string(),
    effect,
  }
}

/// The 24 sample exercises shipped with the app
pub fn default_exercises() -> Vec<Exercise> {
  use DifficultyLevel::*;
  use ExerciseCategory::*;

  vec![
    // Stretching
    exercise("ex001", "상체 스트레칭", Stretching, Beginner, 60, 1320,
      &["어깨", "팔", "가슴"],
      "상체 근육을 풀어주는 기본 스트레칭",
      ExerciseEffect::new(10, 20, 80, 1320),
    ),
    exercise("ex002", "전신 스트레칭", Stretching, Beginner, 45, 1450,
      &["전신"],
      "몸 전체를 풀어주는 스트레칭",
      ExerciseEffect::new(15, 25, 90, 1450),
    ),
    exercise("ex003", "목 스트레칭", Stretching, Beginner, 10, 30,
      &["목", "어깨"],
      "장시간 앉아있을 때 경직된 목 근육 풀기",
      ExerciseEffect::new(5, 10, 60, 30),
    ),
    exercise("ex004", "하체 스트레칭", Stretching, Beginner, 20, 80,
      &["햄스트링", "종아리", "엉덩이"],
      "하체 유연성을 높이는 스트레칭",
      ExerciseEffect::new(8, 15, 75, 80),
    ),

    // Strength
    exercise("ex005", "팔굽혀펴기", Strength, Intermediate, 12, 120,
      &["가슴", "팔", "코어"],
      "기본적인 상체 근력 운동",
      ExerciseEffect::new(70, 30, 10, 120),
    ),
    exercise("ex006", "변형 팔굽혀펴기", Strength, Advanced, 15, 180,
      &["가슴", "삼두근", "어깨"],
      "다양한 각도의 팔굽혀펴기 응용 동작",
      ExerciseEffect::new(85, 35, 15, 180),
    ),
    exercise("ex007", "스쿼트", Strength, Intermediate, 15, 150,
      &["대퇴사두근", "햄스트링", "둔근"],
      "하체 근력 강화의 기본 운동",
      ExerciseEffect::new(75, 40, 20, 150),
    ),
    exercise("ex008", "점프 스쿼트", Strength, Advanced, 20, 250,
      &["대퇴사두근", "둔근", "종아리"],
      "폭발적인 하체 파워를 기르는 운동",
      ExerciseEffect::new(80, 60, 25, 250),
    ),
    exercise("ex009", "플랭크", Strength, Beginner, 10, 80,
      &["코어", "복근"],
      "코어 강화를 위한 기본 운동",
      ExerciseEffect::new(50, 40, 15, 80),
    ),
    exercise("ex010", "사이드 플랭크", Strength, Intermediate, 15, 100,
      &["복사근", "코어"],
      "옆구리와 코어 강화 운동",
      ExerciseEffect::new(60, 45, 20, 100),
    ),
    exercise("ex011", "런지", Strength, Intermediate, 20, 180,
      &["대퇴사두근", "둔근"],
      "균형감각과 하체 근력을 함께 키우는 운동",
      ExerciseEffect::new(65, 50, 30, 180),
    ),
    exercise("ex012", "덤벨 컬", Strength, Beginner, 15, 90,
      &["이두근", "전완근"],
      "팔 근력 강화 운동",
      ExerciseEffect::new(55, 25, 10, 90),
    ),
    exercise("ex013", "데드리프트", Strength, Advanced, 25, 220,
      &["햄스트링", "등", "코어"],
      "전신 근력 강화의 핵심 운동",
      ExerciseEffect::new(90, 50, 25, 220),
    ),

    // Cardio
    exercise("ex014", "버피", Cardio, Advanced, 15, 200,
      &["전신"],
      "전신 유산소 운동",
      ExerciseEffect::new(30, 80, 20, 200),
    ),
    exercise("ex015", "제자리 뛰기", Cardio, Beginner, 20, 150,
      &["하체", "심폐지구력"],
      "집에서 쉽게 할 수 있는 유산소 운동",
      ExerciseEffect::new(20, 70, 15, 150),
    ),
    exercise("ex016", "마운틴 클라이머", Cardio, Intermediate, 15, 180,
      &["코어", "어깨", "하체"],
      "심박수를 높이는 전신 운동",
      ExerciseEffect::new(35, 75, 25, 180),
    ),
    exercise("ex017", "점핑잭", Cardio, Beginner, 15, 120,
      &["전신", "심폐지구력"],
      "몸을 깨우는 워밍업 유산소 운동",
      ExerciseEffect::new(15, 65, 20, 120),
    ),
    exercise("ex018", "하이니", Cardio, Intermediate, 20, 200,
      &["대퇴사두근", "심폐지구력"],
      "무릎을 높이 올리며 달리기",
      ExerciseEffect::new(25, 85, 30, 200),
    ),

    // Flexibility
    exercise("ex019", "요가 기본", Flexibility, Beginner, 30, 100,
      &["전신"],
      "유연성 향상을 위한 기본 요가",
      ExerciseEffect::new(15, 30, 85, 100),
    ),
    exercise("ex020", "다운독 자세", Flexibility, Beginner, 10, 40,
      &["햄스트링", "종아리", "어깨"],
      "요가의 기본 자세로 전신 스트레칭",
      ExerciseEffect::new(10, 20, 70, 40),
    ),
    exercise("ex021", "비둘기 자세", Flexibility, Intermediate, 15, 60,
      &["엉덩이", "고관절"],
      "고관절 유연성을 높이는 요가 자세",
      ExerciseEffect::new(12, 25, 80, 60),
    ),

    // Balance
    exercise("ex022", "한발 서기", Balance, Beginner, 10, 30,
      &["코어", "발목", "균형감각"],
      "기본적인 균형 감각 훈련",
      ExerciseEffect::new(20, 25, 40, 30),
    ),
    exercise("ex023", "트리 자세", Balance, Intermediate, 15, 50,
      &["코어", "다리", "균형감각"],
      "요가의 나무 자세로 균형 감각 향상",
      ExerciseEffect::new(30, 35, 55, 50),
    ),
    exercise("ex024", "보수볼 스쿼트", Balance, Advanced, 20, 140,
      &["하체", "코어", "균형감각"],
      "불안정한 보수볼 위에서 스쿼트",
      ExerciseEffect::new(60, 50, 40, 140),
    ),
  ]
}
