//! Fixed strings and limits shared across the library.

/// The instruction preamble sent to every delegate. It pins the model to the
/// uploaded table and names the exact refusal sentence to emit when the
/// table does not contain the answer.
pub const ANALYST_INSTRUCTION: &str = "You are an excellent data analyst who can answer questions based on a given table of data. Answer only from the table provided below. If you cannot figure out the answer, just politely say `The given context does not provide answer to the following problem`.";

/// The refusal sentence the instruction preamble asks for.
pub const REFUSAL_SENTENCE: &str =
    "The given context does not provide answer to the following problem";

/// Returned by `TableChat::answer` whenever the delegate call fails.
pub const FALLBACK_ANSWER: &str = "I'm sorry, I couldn't process your request.";

/// Returned when a tool-agent outcome carries no `output` field.
pub const NO_OUTPUT_ANSWER: &str = "I don't know";

/// The fixed model identifier for the OpenAI vendor.
pub const OPENAI_MODEL: &str = "gpt-4o-mini";

/// The fixed model identifier for the Gemini vendor.
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Default OpenAI chat-completions endpoint.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default Gemini generateContent endpoint for [`GEMINI_MODEL`].
pub const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Upper bound on the number of data rows rendered into a prompt.
pub const MAX_PROMPT_ROWS: usize = 200;
