// ==========================================
// 库存盘点系统 - 命令行主入口
// ==========================================
// 子命令: session（交互会话）/ summary / convert / export（一次性）/ config
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use contagem_estoque::app::{self, AppState};
use contagem_estoque::config::{ConfigManager, CONFIG_ENV_VAR};
use contagem_estoque::{i18n, logging};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contagem-estoque")]
#[command(about = "Conferência de contagem de estoque (QTD x CONTAGEM)")]
#[command(version)]
struct Cli {
    /// Arquivo de configuração JSON
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Idioma das mensagens (pt-BR ou en)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Logs em JSON (stderr)
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sessão interativa de contagem
    #[command(after_help = "\
Exemplos:
  contagem-estoque session estoque.xlsx
  printf 'load estoque.csv\\nfill 0\\nsummary\\n' | contagem-estoque session")]
    Session {
        /// Planilha a carregar ao iniciar
        file: Option<PathBuf>,
    },

    /// Carrega, apura e imprime o resumo
    Summary {
        /// Planilha de entrada
        file: PathBuf,

        /// Imprime o resumo em JSON
        #[arg(long)]
        json: bool,
    },

    /// Carrega, apura e salva como registros JSON
    Convert {
        /// Planilha de entrada
        input: PathBuf,
        /// Arquivo JSON de saída
        output: PathBuf,
    },

    /// Carrega, apura e exporta para xlsx
    Export {
        /// Planilha de entrada
        input: PathBuf,
        /// Arquivo .xlsx de saída
        output: PathBuf,
    },

    /// Consulta ou altera a configuração
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Lista todas as chaves e valores
    List,
    /// Mostra o valor de uma chave
    Get { key: String },
    /// Altera uma chave e grava o arquivo
    Set { key: String, value: String },
    /// Mostra o caminho do arquivo de configuração
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!(version = contagem_estoque::VERSION, "{}", contagem_estoque::APP_NAME);

    // 加载配置
    let mut config_manager = match &cli.config {
        Some(path) => ConfigManager::from_path(path),
        None => ConfigManager::load_or_default(),
    }
    .context("falha ao carregar a configuração")?;

    // config 操作的是文件中的配置,先于 --locale 覆盖处理
    if let Commands::Config { action } = &cli.command {
        let mut state = AppState::new(config_manager);
        return run_config(&mut state, action);
    }

    if let Some(locale) = &cli.locale {
        config_manager.set_value(contagem_estoque::config::config_keys::LOCALE, locale)?;
    }
    i18n::set_locale(&config_manager.config().locale);
    tracing::debug!(default_config = %app::get_default_config_path(), "configuração resolvida");

    let mut state = AppState::new(config_manager);

    match cli.command {
        Commands::Session { file } => run_session(&mut state, file),
        Commands::Summary { file, json } => {
            state.api.load_and_reconcile(&file)?;
            if json {
                let report = state.api.summary()?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let rows = state.api.summary_rows()?;
                println!("{}", app::render::render_summary(&rows));
            }
            Ok(())
        }
        Commands::Convert { input, output } => {
            state.api.load_and_reconcile(&input)?;
            let report = state.api.save_json(&output)?;
            println!(
                "{}",
                state.tr_args(
                    "shell.saved",
                    &[
                        ("path", &report.path.display().to_string()),
                        ("rows", &report.rows.to_string())
                    ]
                )
            );
            Ok(())
        }
        Commands::Config { action } => run_config(&mut state, &action),
        Commands::Export { input, output } => {
            state.api.load_and_reconcile(&input)?;
            let report = state.api.export_xlsx(&output)?;
            println!(
                "{}",
                state.tr_args(
                    "shell.exported",
                    &[
                        ("path", &report.path.display().to_string()),
                        ("rows", &report.rows.to_string())
                    ]
                )
            );
            Ok(())
        }
    }
}

fn run_session(state: &mut AppState, file: Option<PathBuf>) -> Result<()> {
    if let Some(path) = file {
        let path = path.display().to_string();
        match app::commands::load_table(state, &path) {
            Ok(message) | Err(message) => println!("{}", message),
        }
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();
    app::run(state, stdin.lock(), &mut stdout, interactive).context("falha de E/S na sessão")
}

fn run_config(state: &mut AppState, action: &ConfigAction) -> Result<()> {
    let result = match action {
        ConfigAction::List => app::commands::config_list(state),
        ConfigAction::Get { key } => app::commands::config_get(state, key),
        ConfigAction::Set { key, value } => app::commands::config_set(state, key, value),
        ConfigAction::Path => app::commands::config_path(state),
    };
    match result {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(line) => bail!(line),
    }
}
