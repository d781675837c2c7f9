/// A canned input offered by the example selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Example {
    pub key: &'static str,
    pub text: &'static str,
}

/// Selector entry meaning "leave the text area empty".
pub const NO_EXAMPLE: &str = "Ninguno";

pub static EXAMPLES: [Example; 5] = [
    Example {
        key: "Positivo (ES)",
        text: "¡Me encanta este producto! Es increíble y funciona perfectamente.",
    },
    Example {
        key: "Negativo (ES)",
        text: "Terrible experiencia, no lo recomiendo a nadie.",
    },
    Example {
        key: "Neutral (ES)",
        text: "El producto llegó en la fecha indicada.",
    },
    Example {
        key: "Positive (EN)",
        text: "This is amazing! I absolutely love it!",
    },
    Example {
        key: "Negative (EN)",
        text: "Worst purchase ever. Very disappointed.",
    },
];

pub fn find(key: &str) -> Option<&'static Example> {
    EXAMPLES.iter().find(|example| example.key == key)
}
