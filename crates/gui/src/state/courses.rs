//! Course ("assise") registry

use shared::{Course, DIMENSION_TOLERANCE, POSE_LIBRE_ID};

use crate::error::{EditorError, EditorResult};

/// Ordered set of horizontal courses plus the active one.
///
/// Pose Libre is always present and always sorts first.
#[derive(Debug)]
pub struct CourseRegistry {
    courses: Vec<Course>,
    active_id: String,
    version: u64,
}

impl Default for CourseRegistry {
    fn default() -> Self {
        Self {
            courses: vec![Course::pose_libre()],
            active_id: POSE_LIBRE_ID.to_string(),
            version: 0,
        }
    }
}

impl CourseRegistry {
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn active_course(&self) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == self.active_id)
    }

    /// Vertical snap increment of the active course; `None` for Pose Libre
    /// and for an active id that no longer resolves.
    pub fn active_height(&self) -> Option<f64> {
        self.active_course().and_then(|c| c.height)
    }

    /// Number of courses with a height
    pub fn real_course_count(&self) -> usize {
        self.courses.iter().filter(|c| c.height.is_some()).count()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Create a course from an element height plus the joint, then activate it
    pub fn create_course(
        &mut self,
        element_height: f64,
        joint: f64,
        source_name: &str,
    ) -> EditorResult<&Course> {
        if !element_height.is_finite() || element_height <= 0.0 {
            return Err(EditorError::InvalidHeight(element_height));
        }
        let height = element_height + joint;

        let duplicate = self
            .courses
            .iter()
            .filter_map(|c| c.height)
            .any(|h| (h - height).abs() < DIMENSION_TOLERANCE);
        if duplicate {
            return Err(EditorError::DuplicateCourse(height));
        }

        let short = source_name.split_whitespace().next().unwrap_or("");
        let course = Course {
            id: format!("assise-{}", uuid::Uuid::new_v4()),
            name: format!("Assise {} ({})", self.real_course_count() + 1, short),
            height: Some(height),
        };
        tracing::info!("Created course '{}' at {:.2} cm", course.name, height);

        let id = course.id.clone();
        self.courses.push(course);
        self.sort();
        self.active_id = id;
        self.version += 1;

        self.active_course()
            .ok_or_else(|| EditorError::NotFound("created course".into()))
    }

    /// Activate a course. Unknown ids are kept as-is and resolve to no height.
    pub fn select_course(&mut self, id: &str) {
        if !self.courses.iter().any(|c| c.id == id) {
            tracing::warn!("Selecting unknown course '{}'", id);
        }
        if self.active_id != id {
            self.active_id = id.to_string();
            self.version += 1;
        }
    }

    /// Replace all courses (layout restore).
    ///
    /// Courses with an unusable height, a repeated id, or a height within
    /// tolerance of one already kept are skipped; the first one wins.
    pub fn restore(&mut self, courses: Vec<Course>, active_id: &str) {
        let mut kept: Vec<Course> = Vec::with_capacity(courses.len() + 1);
        for course in courses {
            if course.id == POSE_LIBRE_ID {
                continue;
            }
            let Some(height) = course.height.filter(|h| h.is_finite() && *h > 0.0) else {
                tracing::warn!("Skipping course '{}': invalid height {:?}", course.id, course.height);
                continue;
            };
            if kept.iter().any(|c| c.id == course.id) {
                tracing::warn!("Skipping course '{}': duplicate id", course.id);
                continue;
            }
            let clash = kept
                .iter()
                .filter_map(|c| c.height)
                .any(|h| (h - height).abs() < DIMENSION_TOLERANCE);
            if clash {
                tracing::warn!("Skipping course '{}': height {:.3} already used", course.id, height);
                continue;
            }
            kept.push(course);
        }
        self.courses = kept;
        self.courses.push(Course::pose_libre());
        self.sort();
        self.active_id = active_id.to_string();
        if self.active_course().is_none() {
            tracing::warn!("Restored layout references unknown course '{}'", active_id);
        }
        self.version += 1;
    }

    /// Ascending height, Pose Libre first
    fn sort(&mut self) {
        self.courses.sort_by(|a, b| match (a.height, b.height) {
            (None, None) => std::cmp::Ordering::Equal,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (Some(x), Some(y)) => x.total_cmp(&y),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pose_libre() {
        let r = CourseRegistry::default();
        assert_eq!(r.courses().len(), 1);
        assert_eq!(r.active_id(), POSE_LIBRE_ID);
        assert_eq!(r.active_height(), None);
    }

    #[test]
    fn test_create_course_activates_and_names() {
        let mut r = CourseRegistry::default();
        let course = r.create_course(5.0, 1.2, "Brique M50").unwrap().clone();
        assert_eq!(course.name, "Assise 1 (Brique)");
        assert!(course.id.starts_with("assise-"));
        assert!((course.height.unwrap() - 6.2).abs() < 1e-9);
        assert_eq!(r.active_id(), course.id);
        assert!((r.active_height().unwrap() - 6.2).abs() < 1e-9);
    }

    #[test]
    fn test_create_course_sorted_ascending() {
        let mut r = CourseRegistry::default();
        r.create_course(14.0, 1.2, "Bloc B14").unwrap();
        r.create_course(5.0, 1.2, "Brique M50").unwrap();
        let heights: Vec<_> = r.courses().iter().map(|c| c.height).collect();
        assert_eq!(heights[0], None);
        assert!(heights[1].unwrap() < heights[2].unwrap());
        assert_eq!(r.courses()[2].name, "Assise 1 (Bloc)");
        assert_eq!(r.courses()[1].name, "Assise 2 (Brique)");
    }

    #[test]
    fn test_duplicate_within_tolerance_rejected() {
        let mut r = CourseRegistry::default();
        r.create_course(5.0, 1.2, "Brique").unwrap();
        let err = r.create_course(5.005, 1.2, "Brique").unwrap_err();
        assert!(matches!(err, EditorError::DuplicateCourse(_)));
        assert_eq!(r.real_course_count(), 1);
        assert!(r.create_course(5.02, 1.2, "Brique").is_ok());
        assert_eq!(r.real_course_count(), 2);
    }

    #[test]
    fn test_invalid_height_rejected() {
        let mut r = CourseRegistry::default();
        assert_eq!(
            r.create_course(0.0, 1.2, "x").unwrap_err(),
            EditorError::InvalidHeight(0.0)
        );
        assert!(r.create_course(f64::NAN, 1.2, "x").is_err());
        assert_eq!(r.courses().len(), 1);
    }

    #[test]
    fn test_unknown_course_resolves_to_no_height() {
        let mut r = CourseRegistry::default();
        r.create_course(5.0, 1.2, "Brique").unwrap();
        r.select_course("assise-missing");
        assert_eq!(r.active_id(), "assise-missing");
        assert_eq!(r.active_height(), None);
    }

    #[test]
    fn test_restore_reinserts_pose_libre() {
        let mut r = CourseRegistry::default();
        let c = Course {
            id: "assise-a".into(),
            name: "Assise 1 (Bloc)".into(),
            height: Some(15.2),
        };
        r.restore(vec![c.clone()], "assise-a");
        assert_eq!(r.courses()[0], Course::pose_libre());
        assert_eq!(r.courses()[1], c);
        assert_eq!(r.active_height(), Some(15.2));
    }

    #[test]
    fn test_restore_skips_clashing_courses() {
        let course = |id: &str, height: f64| Course {
            id: id.into(),
            name: format!("Assise {id}"),
            height: Some(height),
        };
        let mut r = CourseRegistry::default();
        r.restore(
            vec![course("a", 6.2), course("b", 6.205), course("a", 15.2), course("c", 15.2)],
            "a",
        );
        let kept: Vec<_> = r.courses().iter().map(|c| (c.id.as_str(), c.height)).collect();
        assert_eq!(
            kept,
            vec![(POSE_LIBRE_ID, None), ("a", Some(6.2)), ("c", Some(15.2))]
        );
        assert_eq!(r.active_height(), Some(6.2));
    }
}
