use anyhow::Context;
use clap::Parser;
use universite_rehberi::app::views::{autocomplete, controls, detail, listing, status};
use universite_rehberi::config::cli::{Command, FilterArgs};
use universite_rehberi::core::ConfigProvider;
use universite_rehberi::utils::error::{DirectoryError, ErrorSeverity};
use universite_rehberi::utils::logger;
use universite_rehberi::utils::validation::{validate_non_empty_string, Validate};
use universite_rehberi::{
    CliConfig, ControllerSettings, FilterController, HttpDirectoryApi, TomlConfig,
};
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 指定 --config 時以 TOML 檔為準
    let toml = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    let verbose = cli.verbose || toml.as_ref().is_some_and(|t| t.verbose());
    if cli.json_logs || toml.as_ref().is_some_and(|t| t.json_logs()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting universite-rehberi");
    if verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &toml {
        Some(config) => run(config, &cli).await,
        None => run(&cli, &cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(
    config: &C,
    cli: &CliConfig,
) -> Result<(), DirectoryError> {
    config.validate()?;

    let api = HttpDirectoryApi::from_config(config)?;
    let settings = ControllerSettings::from_config(config)?;
    tracing::info!("🌐 Directory API: {}", api.base_url());
    let html = cli.html;

    match &cli.command {
        Command::Search { filters, sort } => {
            let listing_url = resolve_listing_url(&settings.page_url, filters.url.as_deref())?;
            let mut controller = FilterController::new(api, settings, listing_url);

            controller.check_status().await;
            // 篩選選項載入失敗時錯誤訊息已在結果區，不再搜尋
            if controller.load_filters().await.is_ok()
                && apply_overrides(&mut controller, filters).await.is_ok()
            {
                match sort {
                    Some(sort) => controller.sort((*sort).into()).await,
                    None => controller.submit_search().await,
                }
            }

            print_status(&controller, html)?;
            print_results(&controller, html)?;
            println!("🔗 {}", controller.location().listing());
        }
        Command::Suggest { text, url, select } => {
            let listing_url = resolve_listing_url(&settings.page_url, url.as_deref())?;
            let mut controller = FilterController::new(api, settings, listing_url);

            controller.autocomplete(text).await;
            if html {
                println!(
                    "{}",
                    autocomplete::render_autocomplete_html(controller.autocomplete_view())?
                );
            } else {
                for (index, item) in controller.autocomplete_view().items.iter().enumerate() {
                    println!("{:>2}. [{}] {}", index, item.program_code, item.label);
                }
            }

            if let Some(index) = select {
                match controller.select_suggestion(*index)? {
                    Some(url) => println!("➡️ {}", url),
                    None => eprintln!("No suggestion at position {}", index),
                }
            }
        }
        Command::Detail { code } => {
            validate_non_empty_string("code", code)?;
            let page_url = settings.page_url.clone();
            let mut controller = FilterController::new(api, settings, page_url);

            controller.show_detail(code).await;
            match controller.detail() {
                Some(view) if html => println!("{}", detail::render_detail_html(view)?),
                Some(view) => println!("{}", detail::render_detail_text(view)),
                None => print_results(&controller, html)?,
            }
        }
        Command::Filters { filters, changed } => {
            let listing_url = resolve_listing_url(&settings.page_url, filters.url.as_deref())?;
            let mut controller = FilterController::new(api, settings, listing_url);

            controller.load_filters().await?;
            apply_overrides(&mut controller, filters).await?;
            if let Some(changed) = changed {
                let reset = controller.load_dependent_filters((*changed).into()).await?;
                for category in reset {
                    eprintln!("🔄 {} cleared", category.label());
                }
            }

            if html {
                println!("{}", controls::render_filters_html(controller.controls())?);
                println!(
                    "{}",
                    controls::render_sort_html(controller.sort_controls(), controller.state().sort)?
                );
            } else {
                println!("{}", controls::render_filters_text(controller.controls()));
            }
        }
        Command::Status => {
            let page_url = settings.page_url.clone();
            let mut controller = FilterController::new(api, settings, page_url);
            controller.check_status().await;
            print_status(&controller, html)?;
        }
        Command::Clear => {
            let page_url = settings.page_url.clone();
            let mut controller = FilterController::new(api, settings, page_url);
            controller.clear_filters().await;
            print_results(&controller, html)?;
            println!("🔗 {}", controller.location().listing());
        }
    }

    Ok(())
}

/// `--url` 可以是完整網址，也可以只是 `?sehir=Ankara` 這樣的查詢字串
fn resolve_listing_url(page_url: &Url, arg: Option<&str>) -> Result<Url, DirectoryError> {
    match arg {
        Some(value) => Ok(page_url.join(value)?),
        None => Ok(page_url.clone()),
    }
}

/// 命令列指定的篩選值視同使用者逐一變更下拉選單，每一個都跑一次連動
async fn apply_overrides(
    controller: &mut FilterController<HttpDirectoryApi>,
    filters: &FilterArgs,
) -> Result<(), DirectoryError> {
    if !filters.has_overrides() {
        return Ok(());
    }
    if let Some(search) = &filters.search {
        controller.set_search_input(search);
    }
    for (category, value) in filters.category_overrides() {
        controller.set_filter_input(category, value);
        controller.load_dependent_filters(category).await?;
    }
    Ok(())
}

fn print_status(
    controller: &FilterController<HttpDirectoryApi>,
    html: bool,
) -> Result<(), DirectoryError> {
    if let Some(badge) = controller.status_badge() {
        if html {
            println!("{}", status::render_status_html(badge)?);
        } else {
            println!("{}", badge.text);
        }
    }
    Ok(())
}

fn print_results(
    controller: &FilterController<HttpDirectoryApi>,
    html: bool,
) -> Result<(), DirectoryError> {
    if html {
        println!("{}", listing::render_results_html(controller.results())?);
    } else {
        println!("{}", listing::render_results_text(controller.results()));
    }
    Ok(())
}
