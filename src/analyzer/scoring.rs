//! Score aggregation: assessment results to category and overall scores

use crate::config::Configuration;
use crate::{
    AssessmentResult, Category, CategoryScore, CategoryWeights, OverallScore, Rating, Report,
    TextStats,
};

/// Highest score a single assessment can give
const MAX_ASSESSMENT_SCORE: f64 = 9.0;

/// Calculator for category and overall scores
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Weighted score of one category over its scored results.
    ///
    /// Results without a score are left out entirely; they do not count as zero.
    pub fn category_score(
        results: &[AssessmentResult],
        category: Category,
        config: &Configuration,
    ) -> CategoryScore {
        let mut earned = 0.0;
        let mut possible = 0.0;
        let mut scored = 0;
        for result in results
            .iter()
            .filter(|r| r.category == category && r.has_score)
        {
            let weight = config.weight(result.identifier);
            earned += weight * f64::from(result.score);
            possible += weight * MAX_ASSESSMENT_SCORE;
            scored += 1;
        }

        if scored == 0 || possible <= 0.0 {
            return CategoryScore {
                category,
                score: 0,
                rating: Rating::Feedback,
                scored: 0,
            };
        }
        let score = (earned / possible * 100.0).round().clamp(0.0, 100.0) as u8;
        CategoryScore {
            category,
            score,
            rating: Rating::from_percent(score),
            scored,
        }
    }

    /// Combine the category scores.
    ///
    /// The number is the category-weighted mean of the scored categories; the
    /// rating is the worst of their ratings.
    pub fn overall(categories: &[&CategoryScore], weights: &CategoryWeights) -> OverallScore {
        let scored: Vec<&CategoryScore> = categories
            .iter()
            .copied()
            .filter(|c| c.scored > 0)
            .collect();
        if scored.is_empty() {
            return OverallScore {
                score: 0,
                rating: Rating::Feedback,
            };
        }

        let weight_of = |c: &CategoryScore| {
            let w = weights.weight(c.category);
            if w.is_finite() && w > 0.0 {
                w
            } else {
                0.0
            }
        };
        let total_weight: f64 = scored.iter().map(|c| weight_of(c)).sum();
        let mean = if total_weight > 0.0 {
            scored
                .iter()
                .map(|c| weight_of(c) * f64::from(c.score))
                .sum::<f64>()
                / total_weight
        } else {
            scored.iter().map(|c| f64::from(c.score)).sum::<f64>() / scored.len() as f64
        };
        let rating = scored
            .iter()
            .map(|c| c.rating)
            .min()
            .unwrap_or(Rating::Feedback);
        OverallScore {
            score: mean.round().clamp(0.0, 100.0) as u8,
            rating,
        }
    }

    /// Lowest score first; ties keep registration order
    pub fn order(results: &mut [AssessmentResult]) {
        results.sort_by_key(|r| (r.score, r.identifier.order()));
    }

    /// Build the report of a pass from its surviving results
    #[tracing::instrument(level = "debug", skip_all, fields(results = results.len()))]
    pub fn aggregate(
        mut results: Vec<AssessmentResult>,
        config: &Configuration,
        locale: &str,
        stats: TextStats,
    ) -> Report {
        Self::order(&mut results);
        let seo = Self::category_score(&results, Category::Seo, config);
        let readability = Self::category_score(&results, Category::Readability, config);
        let overall = Self::overall(&[&seo, &readability], &config.category_weights);
        tracing::debug!(
            seo = seo.score,
            readability = readability.score,
            overall = overall.score,
            "aggregated"
        );
        Report {
            locale: locale.to_string(),
            content_type: config.content_type,
            seo,
            readability,
            overall,
            results,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssessmentId, ContentType};

    fn result(id: AssessmentId, score: u8) -> AssessmentResult {
        AssessmentResult::new(id, score, "")
    }

    #[test]
    fn category_score_is_weighted_share_of_maximum() {
        let results = vec![
            result(AssessmentId::KeyphraseDensity, 9),
            result(AssessmentId::TextLength, 3),
        ];
        let config = Configuration::default();
        let seo = ScoreCalculator::category_score(&results, Category::Seo, &config);
        assert_eq!(seo.score, 67);
        assert_eq!(seo.scored, 2);
        assert_eq!(seo.rating, Rating::Ok);

        let weighted = config.with_weight(AssessmentId::KeyphraseDensity, 3.0);
        let seo = ScoreCalculator::category_score(&results, Category::Seo, &weighted);
        // (27 + 3) / 36
        assert_eq!(seo.score, 83);
        assert_eq!(seo.rating, Rating::Good);
    }

    #[test]
    fn unscored_results_are_excluded_not_zero() {
        let results = vec![
            result(AssessmentId::TextLength, 9),
            AssessmentResult::uncalculated(AssessmentId::KeyphraseLength, "set one"),
        ];
        let seo = ScoreCalculator::category_score(&results, Category::Seo, &Configuration::default());
        assert_eq!(seo.score, 100);
        assert_eq!(seo.scored, 1);
    }

    #[test]
    fn empty_category_is_feedback() {
        let seo = ScoreCalculator::category_score(&[], Category::Seo, &Configuration::default());
        assert_eq!(seo.rating, Rating::Feedback);
        assert_eq!(seo.score, 0);
    }

    #[test]
    fn overall_uses_category_weights_and_worst_rating() {
        let seo = CategoryScore {
            category: Category::Seo,
            score: 90,
            rating: Rating::Good,
            scored: 3,
        };
        let readability = CategoryScore {
            category: Category::Readability,
            score: 30,
            rating: Rating::Bad,
            scored: 2,
        };
        let even = CategoryWeights::for_content_type(ContentType::Post);
        let overall = ScoreCalculator::overall(&[&seo, &readability], &even);
        assert_eq!(overall.score, 60);
        assert_eq!(overall.rating, Rating::Bad);

        let taxonomy = CategoryWeights::for_content_type(ContentType::Taxonomy);
        assert_eq!(ScoreCalculator::overall(&[&seo, &readability], &taxonomy).score, 72);
    }

    #[test]
    fn overall_ignores_unscored_categories() {
        let seo = CategoryScore {
            category: Category::Seo,
            score: 80,
            rating: Rating::Good,
            scored: 1,
        };
        let readability = CategoryScore {
            category: Category::Readability,
            score: 0,
            rating: Rating::Feedback,
            scored: 0,
        };
        let weights = CategoryWeights::for_content_type(ContentType::Post);
        let overall = ScoreCalculator::overall(&[&seo, &readability], &weights);
        assert_eq!(overall.score, 80);
        assert_eq!(overall.rating, Rating::Good);
    }

    #[test]
    fn ordering_is_score_then_registration() {
        let mut results = vec![
            result(AssessmentId::PassiveVoice, 3),
            result(AssessmentId::TextLength, 9),
            result(AssessmentId::IntroductionKeyword, 3),
            AssessmentResult::uncalculated(AssessmentId::KeyphraseLength, ""),
        ];
        ScoreCalculator::order(&mut results);
        let ids: Vec<AssessmentId> = results.iter().map(|r| r.identifier).collect();
        assert_eq!(
            ids,
            vec![
                AssessmentId::KeyphraseLength,
                AssessmentId::IntroductionKeyword,
                AssessmentId::PassiveVoice,
                AssessmentId::TextLength,
            ]
        );
    }
}
