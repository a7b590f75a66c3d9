//! Quality and sustainability scoring for supplier articles.
//!
//! Both scores are additive point systems over boolean certifications and the
//! quality grade. They are displayed as raw point totals between 0 and 100.

use crate::entities::{QualityGrade, supplier_article};

/// Highest value either score can reach
pub const MAX_SCORE: u8 = 100;

/// The attributes both scores are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityFlags {
    /// Certified organic
    pub organic: bool,
    /// Produced in the region
    pub regional: bool,
    /// Fairtrade certified
    pub fairtrade: bool,
    /// Quality tier
    pub grade: QualityGrade,
}

impl QualityFlags {
    /// Quality score: organic 30, regional 20, fairtrade 15, plus 35 / 20 / 10
    /// points for grade A / B / C.
    #[must_use]
    pub const fn quality_score(self) -> u8 {
        let grade_points = match self.grade {
            QualityGrade::A => 35,
            QualityGrade::B => 20,
            QualityGrade::C => 10,
        };
        points(self.organic, 30) + points(self.regional, 20) + points(self.fairtrade, 15) + grade_points
    }

    /// Sustainability score: organic 40, regional 35, fairtrade 25.
    #[must_use]
    pub const fn sustainability_score(self) -> u8 {
        points(self.organic, 40) + points(self.regional, 35) + points(self.fairtrade, 25)
    }
}

impl From<&supplier_article::Model> for QualityFlags {
    fn from(article: &supplier_article::Model) -> Self {
        Self {
            organic: article.is_organic,
            regional: article.is_regional,
            fairtrade: article.is_fairtrade,
            grade: article.quality_grade,
        }
    }
}

const fn points(flag: bool, weight: u8) -> u8 {
    if flag { weight } else { 0 }
}

/// Quality score of a supplier article (0-100).
#[must_use]
pub fn quality_score(article: &supplier_article::Model) -> u8 {
    QualityFlags::from(article).quality_score()
}

/// Sustainability score of a supplier article (0-100).
#[must_use]
pub fn sustainability_score(article: &supplier_article::Model) -> u8 {
    QualityFlags::from(article).sustainability_score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::supplier_article_fixture;

    fn all_flag_combinations() -> Vec<QualityFlags> {
        let mut combinations = Vec::new();
        for grade in [QualityGrade::A, QualityGrade::B, QualityGrade::C] {
            for bits in 0..8_u8 {
                combinations.push(QualityFlags {
                    organic: bits & 1 != 0,
                    regional: bits & 2 != 0,
                    fairtrade: bits & 4 != 0,
                    grade,
                });
            }
        }
        combinations
    }

    #[test]
    fn test_scores_stay_within_bounds() {
        for flags in all_flag_combinations() {
            assert!(flags.quality_score() <= MAX_SCORE, "{flags:?}");
            assert!(flags.sustainability_score() <= MAX_SCORE, "{flags:?}");
        }
    }

    #[test]
    fn test_maximum_scores() {
        let best = QualityFlags {
            organic: true,
            regional: true,
            fairtrade: true,
            grade: QualityGrade::A,
        };
        assert_eq!(best.quality_score(), 100);
        assert_eq!(best.sustainability_score(), 100);
    }

    #[test]
    fn test_grade_only_scores() {
        let plain = |grade| QualityFlags {
            organic: false,
            regional: false,
            fairtrade: false,
            grade,
        };
        assert_eq!(plain(QualityGrade::A).quality_score(), 35);
        assert_eq!(plain(QualityGrade::B).quality_score(), 20);
        assert_eq!(plain(QualityGrade::C).quality_score(), 10);
        assert_eq!(plain(QualityGrade::A).sustainability_score(), 0);
    }

    #[test]
    fn test_scores_from_supplier_article() {
        let mut article = supplier_article_fixture(1, 1, 12.0, "5kg Kiste");
        article.is_organic = true;
        article.is_regional = true;
        article.quality_grade = QualityGrade::B;

        assert_eq!(quality_score(&article), 30 + 20 + 20);
        assert_eq!(sustainability_score(&article), 40 + 35);
    }
}
