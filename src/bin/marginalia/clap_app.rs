use clap::{
    arg,
    builder::{styling::AnsiColor, Styles},
    crate_description, crate_name, crate_version, ColorChoice, Command,
};

fn env_no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|x| !x.is_empty())
}

// Builds the application command line interface defining the commands, subcommands
// and arguments
pub fn build_app(interactive_output: bool) -> Command {
    let color_when = if interactive_output && !env_no_color() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };

    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default());

    Command::new(crate_name!())
        .styles(styles)
        .version(crate_version!())
        .about(crate_description!())
        .color(color_when)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            arg!(-C --config <FILE> "Configuration file to use")
                .global(true)
                .long_help(
                    "Explicitly sets the configuration file to use instead of the default \
                    one ($MARGINALIA_CONFIG_DIR/marginalia.toml). Environment variables \
                    and '~' are expanded.",
                ),
        )
        .subcommand(build_render_command())
        .subcommand(
            Command::new("href")
                .about("Normalizes the given URLs.")
                .long_about(
                    "Prints the given URLs unchanged when they start with a recognized \
                    scheme or are protocol relative, otherwise prepends the protocol.",
                )
                .arg(arg!(<url> ... "URLs to normalize"))
                .arg(
                    arg!(-p --protocol <VALUE> "Protocol prepended to URLs without scheme")
                        .long_help(
                            "Explicitly sets the protocol prepended to URLs without scheme \
                            (defaults to the configured default_protocol).",
                        ),
                ),
        )
        .subcommand(
            Command::new("helper")
                .about("Evaluates a helper on a document state.")
                .long_about(
                    "Evaluates the given helper against the JSON document state read from \
                    the given file (or standard input when '-') and prints its JSON result.",
                )
                .arg(arg!(<name> "Name of the helper to evaluate"))
                .arg(arg!(<state> "JSON document state file ('-' for standard input)")),
        )
        .subcommand(
            Command::new("extensions")
                .alias("ls")
                .about("Lists the configured extensions.")
                .long_about(
                    "Displays the configured extensions in registration order along with \
                    their capabilities and exclusions.",
                ),
        )
}

/// Builds the render command
///
/// # Returns
/// A `Command` object representing the render command.
fn build_render_command() -> Command {
    Command::new("render")
        .about("Renders a JSON element tree to HTML.")
        .long_about(
            "Renders the JSON element tree read from the given file (or standard input \
            when '-') to HTML, applying the SSR transformers of the configured extensions \
            in registration order.",
        )
        .arg(arg!(<document> "JSON element tree file ('-' for standard input)"))
        .arg(arg!(--raw "Skips the SSR transformers.").long_help(
            "Serializes the element tree as it is, without applying any SSR transformer.",
        ))
        .arg(
            arg!(-x --exclude <EXTENSION> ... "Excludes an extension from the SSR pipeline.")
                .long_help(
                    "Opts the given extension out of the SSR pipeline for this run. \
                    Can be specified several times.",
                ),
        )
        .arg(arg!(-o --output <FILE> "Writes the HTML to the given file."))
}
