use super::library::{Complexity, WorkflowTemplate, library};
use crate::monitor::Phase;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// A template is reported as matched above this compatibility.
    pub match_threshold: f64,
    /// Recommendations need at least this compatibility...
    pub recommend_compatibility: f64,
    /// ...and at most this keyword coverage.
    pub recommend_coverage: f64,
    /// Number of recent phase samples compared against templates.
    pub window: usize,
    /// Number of matches kept in a snapshot.
    pub top_n: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.3,
            recommend_compatibility: 0.6,
            recommend_coverage: 0.5,
            window: 10,
            top_n: 3,
        }
    }
}

/// How well the observed behaviour fits one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMatch {
    pub name: String,
    pub complexity: Complexity,
    /// LCS ratio of expected vs observed phases, in `[0, 1]`.
    pub compatibility: f64,
    /// Fraction of the template's keywords found among action labels.
    pub coverage: f64,
    pub matched: bool,
    pub missing_keywords: Vec<String>,
}

/// A suggestion to add actions that a closely matching template expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub template: String,
    pub missing_actions: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    /// Best `top_n` templates, most compatible first.
    pub matches: Vec<TemplateMatch>,
    pub recommendations: Vec<Recommendation>,
}

/// Length of the longest common subsequence, by the classic O(n·m) table.
pub fn lcs_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            current[j + 1] = if x == y {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// LCS length divided by the longer sequence's length. Empty input gives 0.
pub fn compatibility(expected: &[Phase], observed: &[Phase]) -> f64 {
    let longest = expected.len().max(observed.len());
    if expected.is_empty() || observed.is_empty() {
        return 0.0;
    }
    lcs_len(expected, observed) as f64 / longest as f64
}

/// Keywords of `template` that appear in none of `labels` (case-insensitive substring).
pub fn missing_keywords(template: &WorkflowTemplate, labels: &[&str]) -> Vec<&'static str> {
    let lowered: Vec<String> = labels.iter().map(|l| l.to_lowercase()).collect();
    template
        .keywords
        .iter()
        .copied()
        .filter(|keyword| !lowered.iter().any(|label| label.contains(keyword)))
        .collect()
}

/// Fraction of the template's keywords present among `labels`.
pub fn coverage(template: &WorkflowTemplate, labels: &[&str]) -> f64 {
    if template.keywords.is_empty() {
        return 1.0;
    }
    let missing = missing_keywords(template, labels).len();
    (template.keywords.len() - missing) as f64 / template.keywords.len() as f64
}

/// Scores observed phase sequences against a template library.
pub struct TemplateMatcher {
    config: MatcherConfig,
    templates: &'static [WorkflowTemplate],
}

impl TemplateMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            templates: library(),
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn templates(&self) -> &'static [WorkflowTemplate] {
        self.templates
    }

    pub fn score(&self, template: &WorkflowTemplate, observed: &[Phase], labels: &[&str]) -> TemplateMatch {
        let observed = &observed[observed.len().saturating_sub(self.config.window)..];
        let compatibility = compatibility(template.phases, observed);
        TemplateMatch {
            name: template.name.to_string(),
            complexity: template.complexity,
            compatibility,
            coverage: coverage(template, labels),
            matched: compatibility > self.config.match_threshold,
            missing_keywords: missing_keywords(template, labels)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Scores every template and derives recommendations.
    pub fn evaluate(&self, observed: &[Phase], labels: &[&str]) -> Evaluation {
        let scored: Vec<TemplateMatch> = self
            .templates
            .iter()
            .map(|t| self.score(t, observed, labels))
            .sorted_by(|a, b| {
                b.compatibility
                    .total_cmp(&a.compatibility)
                    .then(b.coverage.total_cmp(&a.coverage))
            })
            .collect();

        let recommendations = scored
            .iter()
            .filter(|m| {
                m.compatibility >= self.config.recommend_compatibility
                    && m.coverage < self.config.recommend_coverage
            })
            .map(|m| Recommendation {
                template: m.name.clone(),
                missing_actions: m.missing_keywords.clone(),
                message: format!(
                    "Behaviour resembles '{}' ({:.0}% compatible) but no action covers: {}",
                    m.name,
                    m.compatibility * 100.0,
                    m.missing_keywords.iter().join(", ")
                ),
            })
            .collect();

        Evaluation {
            matches: scored.into_iter().take(self.config.top_n).collect(),
            recommendations,
        }
    }
}

impl Default for TemplateMatcher {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::find;
    use Phase::*;

    #[test]
    fn lcs_of_known_sequences() {
        assert_eq!(lcs_len(&[Show, Do, Process, Show], &[Do, Process]), 2);
        assert_eq!(lcs_len::<Phase>(&[], &[Show]), 0);
        assert_eq!(lcs_len(&[Show, Do, Show], &[Do, Show, Do]), 2);
    }

    #[test]
    fn coverage_is_case_insensitive_substring() {
        let chat = find("chat").unwrap();
        assert_eq!(coverage(chat, &["Send Message", "Back"]), 2.0 / 3.0);
        assert_eq!(missing_keywords(chat, &["Send Message"]), vec!["reply"]);
    }

    #[test]
    fn recommendation_for_compatible_uncovered_template() {
        let matcher = TemplateMatcher::default();
        let evaluation = matcher.evaluate(&[Show, Do, Process, Show], &["tap"]);
        let chat = evaluation
            .recommendations
            .iter()
            .find(|r| r.template == "chat")
            .expect("chat should be recommended");
        assert_eq!(chat.missing_actions, vec!["message", "send", "reply"]);
        assert!(evaluation.matches.len() <= 3);
        assert_eq!(evaluation.matches[0].compatibility, 1.0);
    }
}
