//! Interface de linha de comando do genpoll baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (poll, image-to-video,
//! text-to-video, style-transfer, avatar) e flags globais (--config,
//! --interval, --max-attempts, --verbose).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::polling::Provider;

/// genpoll: submete jobs de geração e acompanha até o resultado final.
#[derive(Debug, Parser)]
#[command(name = "genpoll", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho do arquivo de configuração (padrão: ./genpoll.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Intervalo entre consultas de status, em segundos.
    #[arg(long, global = true)]
    pub interval: Option<u64>,

    /// Número máximo de consultas antes de desistir.
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Habilita saída detalhada (verbose).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Provedor aceito pela CLI, mapeado para [`Provider`] internamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    /// Tarefas da Runway (imagem e vídeo).
    Runway,
    /// Talks do D-ID (avatar falante).
    Did,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Runway => Provider::Runway,
            ProviderArg::Did => Provider::Did,
        }
    }
}

/// Flags comuns aos subcomandos que criam jobs.
#[derive(Debug, Clone, Args)]
pub struct WaitArgs {
    /// Aguarda o job terminar e imprime o resultado.
    #[arg(long, default_value_t = false)]
    pub wait: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Acompanha um job existente até um estado terminal.
    Poll {
        provider: ProviderArg,
        job_id: String,
    },

    /// Gera um vídeo a partir de uma imagem.
    ImageToVideo {
        image_url: String,

        /// Prompt opcional para guiar o movimento.
        #[arg(long)]
        prompt: Option<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Gera uma imagem a partir do texto e depois a anima.
    TextToVideo {
        prompt: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Gera um vídeo guiado por uma imagem de referência de estilo.
    StyleTransfer {
        image_url: String,
        style_url: String,

        #[arg(long)]
        prompt: Option<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Cria um vídeo de avatar falante no D-ID.
    Avatar {
        image_url: String,

        /// Texto falado pelo avatar.
        text: String,

        /// Voz do TTS (padrão da configuração se omitida).
        #[arg(long)]
        voice: Option<String>,

        /// Provedor do TTS (padrão da configuração se omitido).
        #[arg(long)]
        voice_provider: Option<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },
}
