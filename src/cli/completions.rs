use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    fanout completions bash > ~/.bash_completion.d/fanout\n\n\
                  Generate zsh completions:\n    fanout completions zsh > ~/.zfunc/_fanout\n\n\
                  Generate fish completions:\n    fanout completions fish > ~/.config/fish/completions/fanout.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
