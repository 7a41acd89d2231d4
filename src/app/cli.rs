#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Wizard,
    Sequence,
    Prompt,
    Doctor,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "wizard" => CliVerb::Wizard,
        "sequence" => CliVerb::Sequence,
        "prompt" => CliVerb::Prompt,
        "doctor" => CliVerb::Doctor,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  wizard                               Run the interactive sequencing wizard (default)"
            .to_string(),
        "  sequence --title <t> --track <x>...  Sequence an album in one shot".to_string(),
        "           [--artist <a>] [--genre <g>]".to_string(),
        "  prompt --title <t> --track <x>...    Print the request prompt and response schema"
            .to_string(),
        "  doctor                               Check credentials, config and endpoint".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub fn environment_help_lines() -> Vec<String> {
    vec![
        "  GEMINI_API_KEY | API_KEY             Credential for the sequencing service".to_string(),
        "  SONICSEQ_CONFIG                      Settings file (default ~/.sonicseq/config.yaml)"
            .to_string(),
        "  SONICSEQ_API_BASE                    Override provider.api_base".to_string(),
        "  SONICSEQ_LOG_PATH                    Operator log file".to_string(),
        "  SONICSEQ_SCRIPT_KEYS                 Run the wizard headless from a key script"
            .to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push("Environment:".to_string());
    lines.extend(environment_help_lines());
    lines.join("\n")
}
