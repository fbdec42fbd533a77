//! Ruleset types - the coefficients table the scorer consumes
//!
//! Weights are fixed configuration supplied at startup, trained offline and
//! shipped as data. The engine only evaluates them; nothing here learns.

use serde::{Deserialize, Serialize};

/// Decision threshold the shipped coefficients were trained for
pub const DEFAULT_THRESHOLD: f64 = 0.75;

/// Trained weights for the new-password output type
const DEFAULT_WEIGHTS: &[(&str, f64)] = &[
    ("hasNewLabel", 2.9195094108581543),
    ("hasConfirmLabel", 2.1672143936157227),
    ("hasCurrentLabel", -2.1813206672668457),
    ("closestLabelMatchesNew", 2.965045213699341),
    ("closestLabelMatchesConfirm", 2.698647975921631),
    ("closestLabelMatchesCurrent", -2.147423505783081),
    ("hasNewAriaLabel", 2.8312134742736816),
    ("hasConfirmAriaLabel", 1.5153108835220337),
    ("hasCurrentAriaLabel", -4.368860244750977),
    ("hasNewPlaceholder", 1.4374250173568726),
    ("hasConfirmPlaceholder", 1.717592477798462),
    ("hasCurrentPlaceholder", -1.9401700496673584),
    ("forgotPasswordInFormLinkTextContent", -0.6736700534820557),
    ("forgotPasswordInFormLinkHref", -1.3025357723236084),
    ("forgotPasswordInFormLinkTitle", -2.9019577503204346),
    ("forgotInFormLinkTextContent", -1.2455425262451172),
    ("forgotInFormLinkHref", 0.4884686768054962),
    ("forgotPasswordInFormButtonTextContent", -0.8015769720077515),
    ("forgotPasswordOnPageLinkTextContent", 0.04422328248620033),
    ("forgotPasswordOnPageLinkHref", -1.0331494808197021),
    ("forgotPasswordOnPageLinkTitle", -0.08798415213823318),
    ("forgotPasswordOnPageButtonTextContent", -1.5396910905838013),
    ("elementAttrsMatchNew", 2.8492355346679688),
    ("elementAttrsMatchConfirm", 1.9043376445770264),
    ("elementAttrsMatchCurrent", -2.056903839111328),
    ("elementAttrsMatchPassword1", 1.5833512544631958),
    ("elementAttrsMatchPassword2", 1.3928000926971436),
    ("elementAttrsMatchLogin", 1.738782525062561),
    ("formAttrsMatchRegister", 2.1345033645629883),
    ("formHasRegisterAction", 1.9337323904037476),
    ("formButtonIsRegister", 3.0930404663085938),
    ("formAttrsMatchLogin", -0.5816961526870728),
    ("formHasLoginAction", -0.18886367976665497),
    ("formButtonIsLogin", -2.332860231399536),
    ("hasAutocompleteCurrentPassword", -0.029974736273288727),
    ("formHasRememberMeCheckbox", 0.8600837588310242),
    ("formHasRememberMeLabel", 0.06663893908262253),
    ("formHasNewsletterCheckbox", -1.4851698875427246),
    ("formHasNewsletterLabel", 2.416919231414795),
    ("closestHeaderAboveIsLoginy", -2.0047383308410645),
    ("closestHeaderAboveIsRegistery", 2.19451642036438),
    ("nextInputIsConfirmy", 2.5344431400299072),
    ("formHasMultipleVisibleInput", 2.81270694732666),
    ("firstFieldInFormWithThreePasswordFields", -2.8964080810546875),
];

/// Bias trained alongside the default weights
const DEFAULT_BIAS: f64 = -1.3525885343551636;

/// Feature weights plus a bias for one output type. Immutable once built;
/// swapping models means building a new classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coefficients {
    /// `(feature name, weight)` pairs; names must exist in the registry
    pub weights: Vec<(String, f64)>,
    pub bias: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|&(name, w)| (name.to_string(), w))
                .collect(),
            bias: DEFAULT_BIAS,
        }
    }
}

impl Coefficients {
    /// Load a coefficients table from JSON
    /// (`{"weights": [["name", 1.0], ...], "bias": -1.0}`)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features;

    #[test]
    fn test_default_weights_all_name_registered_features() {
        let coefficients = Coefficients::default();
        assert_eq!(coefficients.weights.len(), features::REGISTRY.len());
        for (name, _) in &coefficients.weights {
            assert!(
                features::feature(name).is_some(),
                "unregistered feature {name}"
            );
        }
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{"weights":[["hasNewLabel",2.5]],"bias":-0.5}"#;
        let coefficients = Coefficients::from_json(json).unwrap();
        assert_eq!(coefficients.weights.len(), 1);
        assert_eq!(coefficients.bias, -0.5);
    }
}
