//! Instruction prompt for the grammar model

/// System prompt sent with every relayed sentence
///
/// The model answers in two labelled lines and returns nothing when the
/// sentence is already correct.
pub const GRAMMAR_CHECK_PROMPT: &str = "Ikaw ay isang tagasuri ng gramatika sa wikang Filipino.
Sagutin lamang sa format na ito:

MALI: <**maling bahagi**>
TAMANG SAGOT: <buong tamang pangungusap>

- I-highlight ang maling bahagi gamit ang **bold**.
- Kung WALANG MALI, huwag magbalik ng kahit anong output (blangko response).";

/// Replies treated as "nothing to correct" besides an empty one
pub const NO_ERROR_MARKERS: &[&str] = &["walang mali"];

