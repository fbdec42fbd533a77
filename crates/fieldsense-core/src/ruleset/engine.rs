//! Scoring engine - generic weighted-sum evaluation over the feature table
//!
//! The engine is oblivious to what any feature means: it resolves coefficient
//! names against the registry once at construction, then evaluates the
//! resulting `(name, weight, evaluator)` records and folds them into a
//! logistic-squashed linear score. Swapping feature sets or weights never
//! touches this code.

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::cache::FactCache;
use super::types::{Coefficients, DEFAULT_THRESHOLD};
use crate::dom::{Document, NodeId};
use crate::error::ModelError;
use crate::features::{self, FeatureFn, PassContext};
use crate::patterns::{PatternConfig, Patterns};

#[derive(Debug)]
struct ScoringRule {
    name: String,
    weight: f64,
    eval: FeatureFn,
}

/// Classifier for one output type ("candidate new-password field")
#[derive(Debug)]
pub struct FieldClassifier {
    patterns: Patterns,
    rules: Vec<ScoringRule>,
    bias: f64,
    threshold: f64,
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl FieldClassifier {
    /// Build a classifier from pattern sources and a coefficients table.
    /// Every coefficient must name a registered feature.
    pub fn new(config: &PatternConfig, coefficients: &Coefficients) -> Result<Self, ModelError> {
        let patterns = Patterns::compile_from(config)?;
        let mut rules = Vec::with_capacity(coefficients.weights.len());
        for (name, weight) in &coefficients.weights {
            let eval = features::feature(name)
                .ok_or_else(|| ModelError::UnknownFeature(name.clone()))?;
            rules.push(ScoringRule {
                name: name.clone(),
                weight: *weight,
                eval,
            });
        }
        Ok(Self {
            patterns,
            rules,
            bias: coefficients.bias,
            threshold: DEFAULT_THRESHOLD,
        })
    }

    /// The shipped model: built-in patterns and trained coefficients
    pub fn default_model() -> Self {
        Self::new(&PatternConfig::default(), &Coefficients::default())
            .expect("shipped model is valid")
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a set of nodes in one sweep.
    ///
    /// Returns the logistic-squashed score per node. One fresh fact cache
    /// serves the whole sweep, so descendant queries are shared across rules
    /// and nodes but can never leak in from an earlier tree snapshot.
    pub fn classify(&self, doc: &Document, nodes: &[NodeId]) -> FxHashMap<NodeId, f64> {
        debug!(
            "classifying {} node(s) against {} rule(s)",
            nodes.len(),
            self.rules.len()
        );
        let mut cache = FactCache::new();
        let mut scores = FxHashMap::default();
        for &node in nodes {
            let raw = self.raw_score_with_cache(doc, &mut cache, node);
            scores.insert(node, sigmoid(raw));
        }
        scores
    }

    /// Logistic-squashed score for one node, with its own single-pass cache
    pub fn score(&self, doc: &Document, node: NodeId) -> f64 {
        let mut cache = FactCache::new();
        sigmoid(self.raw_score_with_cache(doc, &mut cache, node))
    }

    /// The exact linear combination `sum(weight * value) + bias` for one
    /// node, before squashing. No hidden normalization.
    pub fn raw_score(&self, doc: &Document, node: NodeId) -> f64 {
        let mut cache = FactCache::new();
        self.raw_score_with_cache(doc, &mut cache, node)
    }

    fn raw_score_with_cache(&self, doc: &Document, cache: &mut FactCache, node: NodeId) -> f64 {
        let mut ctx = PassContext {
            doc,
            patterns: &self.patterns,
            cache,
        };
        let mut sum = self.bias;
        for rule in &self.rules {
            let fired = (rule.eval)(&mut ctx, node);
            if fired {
                sum += rule.weight;
            }
            trace!("rule {} -> {}", rule.name, fired);
        }
        sum
    }

    /// Convenience form: classify one node and threshold the score.
    ///
    /// An explicit `autocomplete=new-password` short-circuits the model, and
    /// a score exactly at the threshold is not a match.
    pub fn is_likely_new_password_field(&self, doc: &Document, node: NodeId) -> bool {
        if doc.node(node).autocomplete_field_name() == Some("new-password") {
            return true;
        }
        self.score(doc, node) > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{InputType, Node};

    fn coefficients(weights: &[(&str, f64)], bias: f64) -> Coefficients {
        Coefficients {
            weights: weights
                .iter()
                .map(|&(n, w)| (n.to_string(), w))
                .collect(),
            bias,
        }
    }

    fn classifier(weights: &[(&str, f64)], bias: f64) -> FieldClassifier {
        FieldClassifier::new(&PatternConfig::default(), &coefficients(weights, bias)).unwrap()
    }

    /// A form with a confirm-named password right after the candidate
    fn confirmy_form() -> (Document, NodeId) {
        let mut doc = Document::new();
        let form = doc.append(None, Node::form());
        let field = doc.append(Some(form), Node::input(InputType::Password));
        let mut confirm = Node::input(InputType::Password);
        confirm.name = "confirm".to_string();
        doc.append(Some(form), confirm);
        (doc, field)
    }

    #[test]
    fn test_unknown_feature_is_rejected() {
        let err =
            FieldClassifier::new(&PatternConfig::default(), &coefficients(&[("bogus", 1.0)], 0.0))
                .unwrap_err();
        match err {
            ModelError::UnknownFeature(name) => assert_eq!(name, "bogus"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_raw_score_is_the_exact_linear_combination() {
        let (doc, field) = confirmy_form();
        let model = classifier(
            &[("nextInputIsConfirmy", 1.25), ("hasNewLabel", 10.0)],
            -0.5,
        );
        // nextInputIsConfirmy fires, hasNewLabel does not
        let raw = model.raw_score(&doc, field);
        assert!((raw - (1.25 - 0.5)).abs() < 1e-12);
        let score = model.score(&doc, field);
        assert!((score - 1.0 / (1.0 + (-0.75f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_score_at_threshold_is_not_a_match() {
        let (doc, field) = confirmy_form();
        let model = classifier(&[("nextInputIsConfirmy", 1.0)], 0.0);
        let score = model.score(&doc, field);

        // A score exactly at the threshold is not a match; anything below
        // the score is
        let at = classifier(&[("nextInputIsConfirmy", 1.0)], 0.0).with_threshold(score);
        assert!(!at.is_likely_new_password_field(&doc, field));
        let below = classifier(&[("nextInputIsConfirmy", 1.0)], 0.0).with_threshold(score - 1e-9);
        assert!(below.is_likely_new_password_field(&doc, field));
    }

    #[test]
    fn test_autocomplete_new_password_short_circuits() {
        let mut doc = Document::new();
        let mut field = Node::input(InputType::Password);
        field.autocomplete = Some("new-password".to_string());
        let field = doc.append(None, field);
        // All-zero weights would never cross the threshold on their own
        let model = classifier(&[("hasNewLabel", 0.0)], -10.0);
        assert!(model.is_likely_new_password_field(&doc, field));
    }

    #[test]
    fn test_default_model_flags_a_registration_form() {
        let mut doc = Document::new();
        let mut form = Node::form();
        form.action = Some("https://example.com/signup".to_string());
        form.class = "reg-form".to_string();
        let form = doc.append(None, form);
        doc.append(Some(form), Node::input(InputType::Text));
        doc.append(Some(form), Node::input(InputType::Email));
        let mut field = Node::input(InputType::Password);
        field.name = "new_password".to_string();
        field.placeholder = Some("Choose a password".to_string());
        let field = doc.append(Some(form), field);
        let mut confirm = Node::input(InputType::Password);
        confirm.name = "confirm_password".to_string();
        doc.append(Some(form), confirm);
        let mut submit = Node::input(InputType::Submit);
        submit.value = "Sign up".to_string();
        doc.append(Some(form), submit);

        let model = FieldClassifier::default_model();
        assert!(model.is_likely_new_password_field(&doc, field));
    }

    #[test]
    fn test_default_model_rejects_a_login_form() {
        let mut doc = Document::new();
        let mut form = Node::form();
        form.action = Some("https://example.com/login".to_string());
        form.class = "login-form".to_string();
        let form = doc.append(None, form);
        doc.append(Some(form), Node::input(InputType::Text));
        let mut field = Node::input(InputType::Password);
        field.name = "password".to_string();
        field.autocomplete = Some("current-password".to_string());
        let field = doc.append(Some(form), field);
        let mut submit = Node::input(InputType::Submit);
        submit.value = "Log in".to_string();
        doc.append(Some(form), submit);

        let model = FieldClassifier::default_model();
        assert!(!model.is_likely_new_password_field(&doc, field));
    }

    #[test]
    fn test_three_password_feature_drives_classification() {
        let mut doc = Document::new();
        let form = doc.append(None, Node::form());
        let first = doc.append(Some(form), Node::input(InputType::Password));
        doc.append(Some(form), Node::input(InputType::Password));
        doc.append(Some(form), Node::input(InputType::Password));

        // With every other weight zero, the classification crosses the
        // threshold exactly when the lone weight beats the logit of 0.75
        let cutoff = 3.0f64.ln();
        let model = classifier(
            &[("firstFieldInFormWithThreePasswordFields", cutoff + 0.1)],
            0.0,
        );
        assert!(model.is_likely_new_password_field(&doc, first));

        let weak = classifier(
            &[("firstFieldInFormWithThreePasswordFields", cutoff - 0.1)],
            0.0,
        );
        assert!(!weak.is_likely_new_password_field(&doc, first));
    }

    #[test]
    fn test_classify_returns_scores_for_every_requested_node() {
        let (doc, field) = confirmy_form();
        let other = NodeId(2);
        let model = FieldClassifier::default_model();
        let scores = model.classify(&doc, &[field, other]);
        assert_eq!(scores.len(), 2);
        for score in scores.values() {
            assert!((0.0..=1.0).contains(score));
        }
    }

    #[test]
    fn test_sequential_passes_never_see_stale_descendants() {
        // Same classifier, two sweeps; the tree changes in between. The
        // second sweep must observe the new state.
        let mut doc = Document::new();
        let form = doc.append(None, Node::form());
        let field = doc.append(Some(form), Node::input(InputType::Password));

        let weight = 5.0;
        let model = classifier(&[("nextInputIsConfirmy", weight)], 0.0);
        let before = model.raw_score(&doc, field);
        assert_eq!(before, 0.0);

        let mut confirm = Node::input(InputType::Password);
        confirm.name = "retype_password".to_string();
        doc.append(Some(form), confirm);
        let after = model.raw_score(&doc, field);
        assert_eq!(after, weight);
    }
}
