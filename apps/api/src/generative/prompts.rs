// Prompt fragments and fixed model parameters for the generative backends.

pub const IMAGE_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";
pub const SUMMARY_MODEL: &str = "facebook/bart-large-cnn";
pub const SPEECH_MODEL: &str = "tts-1";
pub const CHAT_MODEL: &str = "gpt-4";

pub const SUMMARY_MAX_LENGTH: u32 = 130;
pub const SUMMARY_MIN_LENGTH: u32 = 30;

/// Code debugging prompt. Replace `{code}` before sending.
pub const CODE_DEBUG_PROMPT_TEMPLATE: &str =
    "Analyze this code for errors and explain fixes:\n```python\n{code}\n```";

pub fn code_debug_prompt(code: &str) -> String {
    CODE_DEBUG_PROMPT_TEMPLATE.replace("{code}", code)
}
