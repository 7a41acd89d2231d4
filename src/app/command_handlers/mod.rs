use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod doctor;
pub mod sequence;
pub mod wizard;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let Some(verb) = args.first() else {
        return wizard::cmd_wizard();
    };

    match parse_cli_verb(verb.as_str()) {
        CliVerb::Wizard => wizard::cmd_wizard(),
        CliVerb::Sequence => sequence::cmd_sequence(&args[1..]),
        CliVerb::Prompt => sequence::cmd_prompt(&args[1..]),
        CliVerb::Doctor => doctor::cmd_doctor(),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!(
            "unknown command `{verb}`; run `sonicseq help` for usage"
        )),
    }
}
