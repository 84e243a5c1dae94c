//! Course recommendation
//!
//! Turns an [`Analysis`] into categorized course suggestions by
//! cross-referencing unsatisfied requirements against the live catalog.
//! Categories are produced in priority order: unsatisfied composite rules
//! first, then still-missing required courses, then per-classification
//! credit make-up sorted by shortfall.
//!
//! A course name appears at most once across the whole output, and the
//! capped steps add at most [`DEFAULT_MAX_PER_CATEGORY`] entries per
//! category. Absent catalog data degrades to empty categories, which are
//! dropped from the output.

use std::collections::HashSet;

use crate::core::evaluator::{AdvisorError, Analysis, ClassificationStatus};
use crate::core::models::course::normalize_name;
use crate::core::models::{Catalog, Course, Student};
use crate::core::requirements::{Requirements, RequirementsTable, RuleSpec};
use crate::core::store::StudentStore;

/// Default number of suggestions per capped category
pub const DEFAULT_MAX_PER_CATEGORY: usize = 2;

/// Category label for still-missing required courses
const MUST_TAKE_LABEL: &str = "Must-take required courses";

/// One labeled group of suggested courses
#[derive(Debug, Clone)]
pub struct RecommendationCategory {
    /// Category label shown in reports
    pub label: String,
    /// Suggested catalog entries, in selection order
    pub courses: Vec<Course>,
}

/// Categorized course suggestions, in priority order
#[derive(Debug, Clone, Default)]
pub struct Recommendations {
    categories: Vec<RecommendationCategory>,
}

impl Recommendations {
    /// All categories, in priority order
    #[must_use]
    pub fn categories(&self) -> &[RecommendationCategory] {
        &self.categories
    }

    /// Whether no category produced a suggestion
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of suggested courses across all categories
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.categories.iter().map(|c| c.courses.len()).sum()
    }

    /// Add a category, dropping it when it holds no courses
    fn push(&mut self, label: String, courses: Vec<Course>) {
        if courses.is_empty() {
            return;
        }
        self.categories.push(RecommendationCategory { label, courses });
    }
}

/// Configuration for the course recommender
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    /// Maximum suggestions per capped category
    pub max_per_category: usize,
    /// Classifications whose make-up suggestions draw from the student's
    /// own department pool rather than the unrestricted pool
    pub major_classifications: Vec<String>,
}

impl RecommenderConfig {
    /// Build a config carrying the table's major-classification split
    #[must_use]
    pub fn for_table(table: &RequirementsTable) -> Self {
        Self {
            max_per_category: DEFAULT_MAX_PER_CATEGORY,
            major_classifications: table.major_classifications.clone(),
        }
    }
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_per_category: DEFAULT_MAX_PER_CATEGORY,
            major_classifications: Vec::new(),
        }
    }
}

/// Course recommender cross-referencing an analysis against catalog pools
///
/// Both pools must already exclude cancelled courses and the student's
/// taken course names; the store's `fetch_available_courses` does this.
pub struct CourseRecommender<'a> {
    requirements: &'a Requirements,
    analysis: &'a Analysis,
    major_pool: &'a Catalog,
    general_pool: &'a Catalog,
    config: RecommenderConfig,
}

impl<'a> CourseRecommender<'a> {
    /// Create a new recommender over the given pools
    #[must_use]
    pub const fn new(
        requirements: &'a Requirements,
        analysis: &'a Analysis,
        major_pool: &'a Catalog,
        general_pool: &'a Catalog,
        config: RecommenderConfig,
    ) -> Self {
        Self {
            requirements,
            analysis,
            major_pool,
            general_pool,
            config,
        }
    }

    /// Produce categorized suggestions in priority order
    ///
    /// 1. Unsatisfied composite rules, in rule order (area rules get one
    ///    category per incomplete area)
    /// 2. Still-missing required courses, one match per course, under a
    ///    single must-take category
    /// 3. Classifications with positive shortfall, largest gap first
    #[must_use]
    pub fn suggest(&self) -> Recommendations {
        let pool = self.combined_pool();
        let mut recommendations = Recommendations::default();
        let mut recommended: HashSet<String> = HashSet::new();

        self.suggest_for_rules(&pool, &mut recommendations, &mut recommended);
        self.suggest_required(&pool, &mut recommendations, &mut recommended);
        self.suggest_shortfalls(&mut recommendations, &mut recommended);

        recommendations
    }

    /// Union of the major and general pools, deduplicated by lecture number
    fn combined_pool(&self) -> Vec<&'a Course> {
        let mut seen: HashSet<&str> = HashSet::new();
        self.major_pool
            .courses()
            .iter()
            .chain(self.general_pool.courses())
            .filter(|course| seen.insert(course.lecture_number.as_str()))
            .collect()
    }

    fn is_major(&self, classification: &str) -> bool {
        self.config
            .major_classifications
            .iter()
            .any(|c| c == classification)
    }

    fn suggest_for_rules(
        &self,
        pool: &[&'a Course],
        recommendations: &mut Recommendations,
        recommended: &mut HashSet<String>,
    ) {
        for outcome in self.analysis.unsatisfied_rules() {
            let Some(rule) = self.requirements.detailed_requirements.get(&outcome.name) else {
                continue;
            };
            match &rule.spec {
                // Credit-sum gaps have no specific courses; the shortfall
                // step covers them.
                RuleSpec::CreditSum { .. } => {}
                RuleSpec::TakeAll { .. } => {
                    let candidates =
                        self.matches_for_names(pool, &outcome.missing_courses, recommended);
                    commit_category(
                        recommendations,
                        rule_label(&outcome.name),
                        candidates,
                        recommended,
                    );
                }
                RuleSpec::TakeOneOrMore { courses } => {
                    let candidates = self.pool_matches(pool, courses, recommended);
                    commit_category(
                        recommendations,
                        rule_label(&outcome.name),
                        candidates,
                        recommended,
                    );
                }
                RuleSpec::AreaBased { areas, .. } => {
                    for area in &outcome.missing_areas {
                        let Some(area_courses) = areas.get(area) else {
                            continue;
                        };
                        let candidates = self.pool_matches(pool, area_courses, recommended);
                        commit_category(recommendations, area_label(area), candidates, recommended);
                    }
                }
            }
        }
    }

    /// First pool match per listed name, capped
    fn matches_for_names(
        &self,
        pool: &[&'a Course],
        names: &[String],
        recommended: &HashSet<String>,
    ) -> Vec<&'a Course> {
        let mut matches: Vec<&'a Course> = Vec::new();
        for name in names {
            if matches.len() == self.config.max_per_category {
                break;
            }
            let normalized = normalize_name(name);
            if recommended.contains(&normalized)
                || matches.iter().any(|c| c.normalized_name() == normalized)
            {
                continue;
            }
            if let Some(course) = pool
                .iter()
                .copied()
                .find(|c| c.normalized_name() == normalized)
            {
                matches.push(course);
            }
        }
        matches
    }

    /// Pool entries whose normalized name matches any listed name, in pool
    /// order, capped
    fn pool_matches(
        &self,
        pool: &[&'a Course],
        listed: &[String],
        recommended: &HashSet<String>,
    ) -> Vec<&'a Course> {
        let listed: HashSet<String> = listed.iter().map(|name| normalize_name(name)).collect();
        let mut matches: Vec<&'a Course> = Vec::new();
        for course in pool.iter().copied() {
            if matches.len() == self.config.max_per_category {
                break;
            }
            let normalized = course.normalized_name();
            if !listed.contains(&normalized)
                || recommended.contains(&normalized)
                || matches.iter().any(|c| c.normalized_name() == normalized)
            {
                continue;
            }
            matches.push(course);
        }
        matches
    }

    fn suggest_required(
        &self,
        pool: &[&'a Course],
        recommendations: &mut Recommendations,
        recommended: &mut HashSet<String>,
    ) {
        let mut courses = Vec::new();
        for required in &self.analysis.missing_required_courses {
            let normalized = normalize_name(required);
            if recommended.contains(&normalized) {
                continue;
            }
            if let Some(course) = pool
                .iter()
                .copied()
                .find(|c| c.normalized_name() == normalized)
            {
                recommended.insert(normalized);
                courses.push(course.clone());
            }
        }
        recommendations.push(MUST_TAKE_LABEL.to_string(), courses);
    }

    fn suggest_shortfalls(
        &self,
        recommendations: &mut Recommendations,
        recommended: &mut HashSet<String>,
    ) {
        let mut shortfalls: Vec<&ClassificationStatus> = self
            .analysis
            .by_classification
            .iter()
            .filter(|s| s.missing > 0)
            .collect();
        shortfalls.sort_by(|a, b| {
            b.missing
                .cmp(&a.missing)
                .then_with(|| a.classification.cmp(&b.classification))
        });

        for status in shortfalls {
            let pool = if self.is_major(&status.classification) {
                self.major_pool
            } else {
                self.general_pool
            };

            let mut courses = Vec::new();
            for course in pool.courses() {
                if !course.has_classification(&status.classification) {
                    continue;
                }
                let normalized = course.normalized_name();
                if recommended.contains(&normalized) {
                    continue;
                }
                recommended.insert(normalized);
                courses.push(course.clone());
                if courses.len() == self.config.max_per_category {
                    break;
                }
            }
            recommendations.push(shortfall_label(&status.classification), courses);
        }
    }
}

fn rule_label(rule_name: &str) -> String {
    format!("Required for: {rule_name}")
}

fn area_label(area: &str) -> String {
    format!("Required area: {area}")
}

fn shortfall_label(classification: &str) -> String {
    format!("{classification} credit make-up")
}

/// Mark the capped candidates as recommended and add their category
fn commit_category(
    recommendations: &mut Recommendations,
    label: String,
    candidates: Vec<&Course>,
    recommended: &mut HashSet<String>,
) {
    for course in &candidates {
        recommended.insert(course.normalized_name());
    }
    recommendations.push(label, candidates.into_iter().cloned().collect());
}

/// Recommend courses for a student based on an existing analysis.
///
/// Builds the major and general candidate pools from the store, excluding
/// cancelled courses and the student's taken course names, then runs
/// [`CourseRecommender`] with the table's classification split.
///
/// # Errors
/// Returns [`AdvisorError::Store`] when an enrollment or pool fetch fails.
/// An unconfigured department yields an empty recommendation set, not an
/// error.
pub fn suggest_courses(
    student: &Student,
    analysis: &Analysis,
    store: &dyn StudentStore,
    table: &RequirementsTable,
) -> Result<Recommendations, AdvisorError> {
    let Some(requirements) = table.for_department(&student.department) else {
        return Ok(Recommendations::default());
    };

    let enrollments = store.fetch_enrollments(&student.student_id)?;
    let taken_names: Vec<String> = enrollments.iter().map(|e| e.course_name.clone()).collect();

    let departments = [student.department.clone()];
    let major_pool =
        Catalog::from_courses(store.fetch_available_courses(&taken_names, Some(&departments))?);
    let general_pool = Catalog::from_courses(store.fetch_available_courses(&taken_names, None)?);

    let recommender = CourseRecommender::new(
        requirements,
        analysis,
        &major_pool,
        &general_pool,
        RecommenderConfig::for_table(table),
    );
    Ok(recommender.suggest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::evaluator::evaluate;
    use crate::core::models::Enrollment;
    use crate::core::requirements::Rule;
    use std::collections::BTreeMap;

    fn course(lecture_number: &str, name: &str, department: &str, classification: &str) -> Course {
        let mut course = Course::new(
            "CSE2010".to_string(),
            lecture_number.to_string(),
            name.to_string(),
            department.to_string(),
        );
        course.classification = Some(classification.to_string());
        course.credits = Some(3.0);
        course
    }

    fn enrollment(name: &str, classification: &str) -> Enrollment {
        Enrollment::new(
            "2021320045".to_string(),
            name.to_string(),
            Some(3.0),
            "A".to_string(),
            classification.to_string(),
        )
    }

    fn rule(description: &str, spec: RuleSpec) -> Rule {
        Rule {
            description: description.to_string(),
            spec,
        }
    }

    fn requirements_with(rules: Vec<(&str, Rule)>) -> Requirements {
        Requirements {
            total_credits: 130,
            classification_credits: BTreeMap::new(),
            required_courses: Vec::new(),
            detailed_requirements: rules
                .into_iter()
                .map(|(name, rule)| (name.to_string(), rule))
                .collect(),
        }
    }

    fn config_with_majors(majors: &[&str]) -> RecommenderConfig {
        RecommenderConfig {
            max_per_category: DEFAULT_MAX_PER_CATEGORY,
            major_classifications: majors.iter().map(ToString::to_string).collect(),
        }
    }

    fn category_names(recommendations: &Recommendations, label: &str) -> Vec<String> {
        recommendations
            .categories()
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.courses.iter().map(|course| course.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn take_all_gap_recommends_matching_catalog_entries() {
        let requirements = requirements_with(vec![(
            "수학기초",
            rule(
                "선형대수와 일반물리학을 모두 이수",
                RuleSpec::TakeAll {
                    courses: vec!["선형대수".to_string(), "일반물리학".to_string()],
                },
            ),
        )]);
        let analysis = evaluate(&requirements, &[enrollment("선형대수", "기필")]);

        let major_pool = Catalog::new();
        // Catalog formatting drift: the offered section spells the name with
        // a space.
        let general_pool = Catalog::from_courses(vec![course(
            "2024000301",
            "일반 물리학",
            "물리학과",
            "기필",
        )]);
        let recommender = CourseRecommender::new(
            &requirements,
            &analysis,
            &major_pool,
            &general_pool,
            RecommenderConfig::default(),
        );

        let recommendations = recommender.suggest();
        assert_eq!(
            category_names(&recommendations, "Required for: 수학기초"),
            vec!["일반 물리학"]
        );
    }

    #[test]
    fn take_one_or_more_caps_at_two_pool_entries() {
        let requirements = requirements_with(vec![(
            "프로그래밍입문",
            rule(
                "입문 과목 중 한 과목 이상 이수",
                RuleSpec::TakeOneOrMore {
                    courses: vec![
                        "파이썬프로그래밍".to_string(),
                        "C프로그래밍".to_string(),
                        "자바프로그래밍".to_string(),
                    ],
                },
            ),
        )]);
        let analysis = evaluate(&requirements, &[]);

        let major_pool = Catalog::from_courses(vec![
            course("2024000401", "파이썬프로그래밍", "컴퓨터공학과", "전선"),
            course("2024000402", "C프로그래밍", "컴퓨터공학과", "전선"),
            course("2024000403", "자바프로그래밍", "컴퓨터공학과", "전선"),
        ]);
        let general_pool = Catalog::new();
        let recommender = CourseRecommender::new(
            &requirements,
            &analysis,
            &major_pool,
            &general_pool,
            RecommenderConfig::default(),
        );

        let recommendations = recommender.suggest();
        assert_eq!(
            category_names(&recommendations, "Required for: 프로그래밍입문"),
            vec!["파이썬프로그래밍", "C프로그래밍"]
        );
    }

    #[test]
    fn each_missing_area_gets_its_own_category() {
        let mut areas = BTreeMap::new();
        areas.insert("인문".to_string(), vec!["문학의 이해".to_string()]);
        areas.insert("사회".to_string(), vec!["경제학입문".to_string()]);
        let requirements = requirements_with(vec![(
            "균형교양",
            rule(
                "2개 영역 이상에서 각 1과목 이수",
                RuleSpec::AreaBased {
                    areas,
                    num_areas_required: 2,
                },
            ),
        )]);
        let analysis = evaluate(&requirements, &[]);

        let major_pool = Catalog::new();
        let general_pool = Catalog::from_courses(vec![
            course("2024000501", "문학의이해", "교양학부", "교선"),
            course("2024000502", "경제학입문", "경제학과", "교선"),
        ]);
        let recommender = CourseRecommender::new(
            &requirements,
            &analysis,
            &major_pool,
            &general_pool,
            RecommenderConfig::default(),
        );

        let recommendations = recommender.suggest();
        assert_eq!(
            category_names(&recommendations, "Required area: 사회"),
            vec!["경제학입문"]
        );
        assert_eq!(
            category_names(&recommendations, "Required area: 인문"),
            vec!["문학의이해"]
        );
    }

    #[test]
    fn must_take_category_adds_first_match_per_required_course() {
        let mut requirements = requirements_with(Vec::new());
        requirements.required_courses = vec!["자료 구조".to_string(), "운영체제".to_string()];
        let analysis = evaluate(&requirements, &[]);

        let major_pool = Catalog::from_courses(vec![
            course("2024000101", "자료구조", "컴퓨터공학과", "전필"),
            course("2024000102", "자료구조", "컴퓨터공학과", "전필"),
            course("2024000103", "운영체제", "컴퓨터공학과", "전필"),
        ]);
        let general_pool = Catalog::new();
        let recommender = CourseRecommender::new(
            &requirements,
            &analysis,
            &major_pool,
            &general_pool,
            RecommenderConfig::default(),
        );

        let recommendations = recommender.suggest();
        let category = recommendations
            .categories()
            .iter()
            .find(|c| c.label == MUST_TAKE_LABEL)
            .expect("must-take category");
        assert_eq!(category.courses.len(), 2);
        assert_eq!(category.courses[0].lecture_number, "2024000101");
        assert_eq!(category.courses[1].name, "운영체제");
    }

    #[test]
    fn course_names_are_never_recommended_twice() {
        // 자료구조 qualifies both for the take_all rule and as a missing
        // required course; it must only appear under the rule category.
        let mut requirements = requirements_with(vec![(
            "전공기초",
            rule(
                "자료구조 이수",
                RuleSpec::TakeAll {
                    courses: vec!["자료구조".to_string()],
                },
            ),
        )]);
        requirements.required_courses = vec!["자료구조".to_string()];
        let analysis = evaluate(&requirements, &[]);

        let major_pool = Catalog::from_courses(vec![course(
            "2024000101",
            "자료구조",
            "컴퓨터공학과",
            "전필",
        )]);
        let general_pool = Catalog::new();
        let recommender = CourseRecommender::new(
            &requirements,
            &analysis,
            &major_pool,
            &general_pool,
            RecommenderConfig::default(),
        );

        let recommendations = recommender.suggest();
        assert_eq!(
            category_names(&recommendations, "Required for: 전공기초"),
            vec!["자료구조"]
        );
        assert!(recommendations
            .categories()
            .iter()
            .all(|c| c.label != MUST_TAKE_LABEL));
        assert_eq!(recommendations.total_count(), 1);
    }

    #[test]
    fn shortfalls_order_by_gap_and_split_pools() {
        let mut requirements = requirements_with(Vec::new());
        requirements.classification_credits =
            BTreeMap::from([("전선".to_string(), 21), ("교선".to_string(), 12)]);
        let analysis = evaluate(&requirements, &[]);

        let major_pool = Catalog::from_courses(vec![
            course("2024000601", "컴퓨터구조", "컴퓨터공학과", "전선"),
            course("2024000602", "데이터베이스", "컴퓨터공학과", "전선"),
            course("2024000603", "네트워크", "컴퓨터공학과", "전선"),
        ]);
        let general_pool = Catalog::from_courses(vec![
            // A major-elective section from another department never feeds
            // a major-classification shortfall.
            course("2024000701", "회로이론", "전자공학과", "전선"),
            course("2024000702", "글쓰기", "교양학부", "교선"),
        ]);
        let recommender = CourseRecommender::new(
            &requirements,
            &analysis,
            &major_pool,
            &general_pool,
            config_with_majors(&["전필", "전선"]),
        );

        let recommendations = recommender.suggest();
        let labels: Vec<&str> = recommendations
            .categories()
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(labels, vec!["전선 credit make-up", "교선 credit make-up"]);
        assert_eq!(
            category_names(&recommendations, "전선 credit make-up"),
            vec!["컴퓨터구조", "데이터베이스"]
        );
        assert_eq!(
            category_names(&recommendations, "교선 credit make-up"),
            vec!["글쓰기"]
        );
    }

    #[test]
    fn credit_sum_rules_and_satisfied_rules_add_no_category() {
        let requirements = requirements_with(vec![
            (
                "기초과학",
                rule(
                    "기초과학 교과목에서 9학점 이상",
                    RuleSpec::CreditSum {
                        classifications: vec!["기필".to_string()],
                        required_credits: 9,
                    },
                ),
            ),
            (
                "전공기초",
                rule(
                    "자료구조 이수",
                    RuleSpec::TakeAll {
                        courses: vec!["자료구조".to_string()],
                    },
                ),
            ),
        ]);
        let analysis = evaluate(&requirements, &[enrollment("자료구조", "전필")]);

        let major_pool = Catalog::from_courses(vec![course(
            "2024000801",
            "일반물리학",
            "물리학과",
            "기필",
        )]);
        let general_pool = Catalog::new();
        let recommender = CourseRecommender::new(
            &requirements,
            &analysis,
            &major_pool,
            &general_pool,
            RecommenderConfig::default(),
        );

        assert!(recommender.suggest().is_empty());
    }

    #[test]
    fn empty_pools_yield_empty_output() {
        let mut requirements = requirements_with(vec![(
            "수학기초",
            rule(
                "선형대수 이수",
                RuleSpec::TakeAll {
                    courses: vec!["선형대수".to_string()],
                },
            ),
        )]);
        requirements.required_courses = vec!["운영체제".to_string()];
        requirements.classification_credits = BTreeMap::from([("전필".to_string(), 30)]);
        let analysis = evaluate(&requirements, &[]);

        let empty = Catalog::new();
        let recommender = CourseRecommender::new(
            &requirements,
            &analysis,
            &empty,
            &empty,
            RecommenderConfig::default(),
        );

        let recommendations = recommender.suggest();
        assert!(recommendations.is_empty());
        assert_eq!(recommendations.total_count(), 0);
    }

    #[test]
    fn unknown_department_short_circuits_to_empty() {
        use crate::core::store::SqliteStore;

        let store = SqliteStore::in_memory().expect("store");
        let student = Student::new(
            "2021320045".to_string(),
            "김민준".to_string(),
            "미지정학과".to_string(),
        );
        let analysis = evaluate(&requirements_with(Vec::new()), &[]);
        let table = RequirementsTable::default();

        let recommendations =
            suggest_courses(&student, &analysis, &store, &table).expect("no store error");
        assert!(recommendations.is_empty());
    }
}
