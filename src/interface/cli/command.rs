//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::story::{CrossCutting, DetailLevel, GenerationConfig, PointScale};

#[derive(Debug, Parser)]
#[command(name = "storypilot")]
#[command(about = "Turn product requirement documents into sprint-ready user stories")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Listen address (overrides server.bind_addr)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Generate stories from a PRD file ("-" reads stdin)
    Generate {
        input: String,

        #[arg(long, value_enum, default_value_t = DetailArg::Detailed)]
        detail: DetailArg,

        #[arg(long, value_enum, default_value_t = PointsArg::Fibonacci)]
        points: PointsArg,

        /// Cross-cutting concerns. Without any of these the defaults apply
        /// (accessibility, security, performance, error handling).
        #[arg(long)]
        accessibility: bool,
        #[arg(long)]
        security: bool,
        #[arg(long)]
        performance: bool,
        #[arg(long)]
        error_handling: bool,
        #[arg(long)]
        compliance: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the built-in demo PRD and its stories
    Demo,
    /// Show effective merged config and server key source
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DetailArg {
    Light,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PointsArg {
    Fibonacci,
    Tshirt,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// 파일 경로 또는 `-`(stdin)
    pub input: String,
    pub config: GenerationConfig,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Serve { bind: Option<String> },
    Generate(GenerateOptions),
    Demo,
    InspectConfig,
}

impl CliAction {
    /// 서버 모드는 요청 로그를 기본으로 보여준다.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Serve { .. } => "info",
            _ => "warn",
        }
    }
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            Commands::Serve { bind } => CliAction::Serve { bind },
            Commands::Demo => CliAction::Demo,
            Commands::Config => CliAction::InspectConfig,
            Commands::Generate {
                input,
                detail,
                points,
                accessibility,
                security,
                performance,
                error_handling,
                compliance,
                format,
            } => {
                let any_selected =
                    accessibility || security || performance || error_handling || compliance;
                let cross_cutting = if any_selected {
                    CrossCutting {
                        accessibility,
                        security,
                        performance,
                        error_handling,
                        compliance,
                    }
                } else {
                    CrossCutting::default()
                };

                CliAction::Generate(GenerateOptions {
                    input,
                    config: GenerationConfig {
                        detail_level: match detail {
                            DetailArg::Light => DetailLevel::Light,
                            DetailArg::Detailed => DetailLevel::Detailed,
                        },
                        point_scale: match points {
                            PointsArg::Fibonacci => PointScale::Fibonacci,
                            PointsArg::Tshirt => PointScale::Tshirt,
                            PointsArg::None => PointScale::None,
                        },
                        cross_cutting,
                    },
                    format,
                })
            }
        }
    }
}
