use std::io::{IsTerminal, Read};

use crate::{bootstrap::BootStrap, clap_app};
use clap::ArgMatches;
use marginalia::{
    config::MainConfig, constants::store::SSR_TRANSFORMER, debug, document::DocumentState,
    element::Element, error::*, link::extract_href_with, manager::ExtensionManager,
    renderer::SsrRenderer,
};
use nu_ansi_term::Color::{Cyan, Green, Yellow};

pub struct App {
    pub matches: ArgMatches,
}

impl App {
    pub fn new() -> Result<Self> {
        #[cfg(windows)]
        let _ = nu_ansi_term::enable_ansi_support();

        let interactive_output = std::io::stdout().is_terminal();

        Ok(App {
            matches: Self::matches(interactive_output)?,
        })
    }

    pub fn matches(interactive_output: bool) -> Result<ArgMatches> {
        Ok(clap_app::build_app(interactive_output).get_matches())
    }

    /// Start the application, bootstraps the configuration and forwards the request
    /// to the selected subcommand.
    ///
    /// # Returns
    /// A `Result` indicating whether the command completed successfully.
    pub fn start(&self) -> Result<bool> {
        let (command, args) = self.matches.subcommand().ok_or_else(|| {
            Error::ArgsProcessingError("Missing subcommand".to_string())
        })?;

        let config_file = args.get_one::<String>("config").map(|s| s.as_str());
        let config = BootStrap::new(config_file)?.into_config();

        match command {
            "render" => Self::render(config, args),
            "href" => Self::href(&config, args),
            "helper" => Self::helper(&config, args),
            "extensions" => Self::list_extensions(&config),
            _ => Err(Error::ArgsProcessingError(
                "Invalid subcommand provided".to_string(),
            )),
        }
    }

    /// Builds the configured extensions and runs the initialization pass
    fn build_manager(config: &MainConfig) -> Result<ExtensionManager> {
        let mut manager = ExtensionManager::new(config.build_extensions()?, config.settings())?;
        manager.init()?;
        Ok(manager)
    }

    /// Reads the given file, or the standard input when "-"
    fn read_input(path: &str) -> Result<String> {
        if path == "-" {
            let mut data = String::new();
            std::io::stdin().read_to_string(&mut data)?;
            return Ok(data);
        }
        std::fs::read_to_string(path).map_err(|e| Error::DocumentReadError {
            file: path.to_string(),
            cause: e.to_string(),
        })
    }

    fn required<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a str> {
        args.get_one::<String>(id)
            .map(|s| s.as_str())
            .ok_or_else(|| Error::ArgsProcessingError(format!("Missing argument \"{}\"", id)))
    }

    fn render(mut config: MainConfig, args: &ArgMatches) -> Result<bool> {
        for name in args.get_many::<String>("exclude").into_iter().flatten() {
            config.exclude(name, SSR_TRANSFORMER)?;
        }

        let document: Element = serde_json::from_str(&Self::read_input(Self::required(
            args, "document",
        )?)?)?;

        let renderer = if args.get_flag("raw") {
            SsrRenderer::raw()
        } else {
            let manager = Self::build_manager(&config)?;
            let transformer = manager.ssr_transformer()?;
            debug!("SSR pipeline : {:?}", transformer.names());
            SsrRenderer::new(transformer)
        };

        let html = renderer.render(document)?;
        match args.get_one::<String>("output") {
            Some(file) => std::fs::write(file, format!("{}\n", html))?,
            None => println!("{}", html),
        }
        Ok(true)
    }

    fn href(config: &MainConfig, args: &ArgMatches) -> Result<bool> {
        let protocol = args
            .get_one::<String>("protocol")
            .map(|s| s.as_str())
            .unwrap_or(config.defaults.default_protocol.as_str());
        for url in args.get_many::<String>("url").into_iter().flatten() {
            println!("{}", extract_href_with(url, protocol));
        }
        Ok(true)
    }

    fn helper(config: &MainConfig, args: &ArgMatches) -> Result<bool> {
        let name = Self::required(args, "name")?;
        let state: DocumentState =
            serde_json::from_str(&Self::read_input(Self::required(args, "state")?)?)?;

        let manager = Self::build_manager(config)?;
        let value = manager.helpers()?.call(name, &state)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(true)
    }

    fn list_extensions(config: &MainConfig) -> Result<bool> {
        let manager = ExtensionManager::new(config.build_extensions()?, config.settings())?;
        for (index, info) in manager.describe().iter().enumerate() {
            println!("{}. {}", index + 1, Green.paint(&info.name));
            if info.ssr_transformer {
                println!("   {} ssr_transformer", Cyan.paint("provides"));
            }
            if !info.helpers.is_empty() {
                println!(
                    "   {} helpers : {}",
                    Cyan.paint("provides"),
                    info.helpers.join(", ")
                );
            }
            if !info.excluded.is_empty() {
                println!(
                    "   {} {}",
                    Yellow.paint("excluded from"),
                    info.excluded.join(", ")
                );
            }
        }
        Ok(true)
    }
}
