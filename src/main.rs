// SPDX-License-Identifier: MPL-2.0
use ifl_gallery::app::{self, config, paths, Flags};
use ifl_gallery::importer::{self, ImportMetadata, ImportOptions};
use ifl_gallery::media::AssetResolver;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const HELP: &str = "\
IFL Gallery

USAGE:
  ifl_gallery [OPTIONS] [CATALOG]
  ifl_gallery import --season <N> --input <DIR> [IMPORT OPTIONS]

OPTIONS:
  --lang <LOCALE>        Interface language (e.g. en-US, fr)
  --config-dir <DIR>     Directory holding settings.toml
  --assets <DIR>         Local copy of the site's static/ directory
  --write-config         Write the effective settings to settings.toml and exit
  -h, --help             Print this help

IMPORT OPTIONS:
  --season <N>           Season the photos belong to (must exist in the catalog)
  --input <DIR>          Folder of photos to import
  --catalog <FILE>       gallery.json to append to
  --assets <DIR>         Where the WebP renditions are written
  --alt <TEXT>           Alt text (default: \"Season <N> image <K>\")
  --caption <TEXT>
  --match <TEXT>
  --date <YYYY-MM-DD>
  --tags <A,B,...>
  --players <A,B,...>
";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ifl_gallery=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let result = match args.subcommand() {
        Ok(Some(command)) if command == "import" => run_import(args),
        // Not a subcommand: the first free argument is the catalog path
        Ok(first) => run_gallery(args, first),
        Err(err) => Err(err.to_string()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run_gallery(mut args: pico_args::Arguments, catalog_path: Option<String>) -> Result<(), String> {
    let lang: Option<String> = args.opt_value_from_str("--lang").map_err(|e| e.to_string())?;
    let config_dir: Option<String> = args
        .opt_value_from_str("--config-dir")
        .map_err(|e| e.to_string())?;
    let asset_root: Option<String> = args.opt_value_from_str("--assets").map_err(|e| e.to_string())?;
    let write_config = args.contains("--write-config");

    let catalog_path = catalog_path.or_else(|| {
        args.finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok())
    });

    if write_config {
        paths::init_cli_overrides(config_dir);
        let (config, _) = config::load();
        config::save(&config).map_err(|e| e.to_string())?;
        println!("settings written");
        return Ok(());
    }

    app::run(Flags {
        lang,
        catalog_path,
        asset_root,
        config_dir,
    })
    .map_err(|e| e.to_string())
}

fn run_import(mut args: pico_args::Arguments) -> Result<(), String> {
    let season: u32 = args.value_from_str("--season").map_err(|e| e.to_string())?;
    let input: PathBuf = args.value_from_str("--input").map_err(|e| e.to_string())?;
    let config_dir: Option<String> = args
        .opt_value_from_str("--config-dir")
        .map_err(|e| e.to_string())?;
    let catalog: Option<PathBuf> = args.opt_value_from_str("--catalog").map_err(|e| e.to_string())?;
    let assets: Option<PathBuf> = args.opt_value_from_str("--assets").map_err(|e| e.to_string())?;

    let text = |args: &mut pico_args::Arguments, key: &'static str| -> Result<String, String> {
        args.opt_value_from_str::<_, String>(key)
            .map(Option::unwrap_or_default)
            .map_err(|e| e.to_string())
    };
    let alt: Option<String> = args.opt_value_from_str("--alt").map_err(|e| e.to_string())?;
    let caption = text(&mut args, "--caption")?;
    let match_label = text(&mut args, "--match")?;
    let date = importer::validate_date(&text(&mut args, "--date")?).map_err(|e| e.to_string())?;
    let tags = importer::parse_list(&text(&mut args, "--tags")?);
    let players = importer::parse_list(&text(&mut args, "--players")?);

    let leftover = args.finish();
    if !leftover.is_empty() {
        return Err(format!("unexpected arguments: {leftover:?}"));
    }

    paths::init_cli_overrides(config_dir);
    let (config, _) = config::load();
    let catalog = catalog.unwrap_or_else(|| config.catalog_path());
    let assets = assets
        .or_else(|| config.gallery.asset_root.clone())
        .unwrap_or_else(|| AssetResolver::for_catalog(&catalog).root().to_path_buf());

    let options = ImportOptions {
        season,
        input,
        catalog,
        assets,
        metadata: ImportMetadata {
            alt,
            caption,
            match_label,
            date,
            tags,
            players,
        },
    };

    let report = importer::run(&options).map_err(|e| e.to_string())?;
    println!(
        "imported {} image(s) into season {}",
        report.imported.len(),
        options.season
    );
    for (path, reason) in &report.skipped {
        println!("skipped {}: {reason}", path.display());
    }
    Ok(())
}
