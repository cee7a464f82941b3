pub(crate) mod console;
pub(crate) mod console_input;
pub(crate) mod llm_completion;
pub(crate) mod stub;

pub(crate) use console::ConsolePresenter;
pub(crate) use console_input::ConsoleInput;
pub(crate) use llm_completion::ProviderCompletion;
