//! Configuração do genpoll carregada a partir de `genpoll.toml`.
//!
//! A struct [`GenpollConfig`] agrupa uma seção por provedor (`[runway]` e
//! `[did]`). Valores não presentes no arquivo usam defaults sensíveis.
//! As variáveis de ambiente `RUNWAYML_API_KEY` e `DID_API_KEY` têm
//! precedência sobre o arquivo.

use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::polling::PollSettings;
use crate::providers::{VoiceProvider, did, runway};

/// Nome do arquivo procurado no diretório atual.
pub const CONFIG_FILE: &str = "genpoll.toml";

pub const RUNWAY_KEY_ENV: &str = "RUNWAYML_API_KEY";
pub const DID_KEY_ENV: &str = "DID_API_KEY";

/// Configuração de nível superior carregada de `genpoll.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenpollConfig {
    #[serde(default)]
    pub runway: RunwayConfig,

    #[serde(default)]
    pub did: DidConfig,
}

/// Seção `[runway]`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunwayConfig {
    /// Chave da API Runway (token Bearer).
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_runway_base_url")]
    pub base_url: String,

    /// Intervalo entre consultas de status, em segundos.
    #[serde(default = "default_runway_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_runway_attempts")]
    pub max_attempts: u32,
}

/// Seção `[did]`.
#[derive(Debug, Clone, Deserialize)]
pub struct DidConfig {
    /// Chave da API D-ID, usada como usuário no Basic auth.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_did_base_url")]
    pub base_url: String,

    #[serde(default = "default_did_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_did_attempts")]
    pub max_attempts: u32,

    /// Voz usada quando a requisição não especifica uma.
    #[serde(default = "default_voice_id")]
    pub default_voice_id: String,

    /// Provedor de TTS usado quando a requisição não especifica um.
    #[serde(default = "default_voice_provider")]
    pub default_voice_provider: String,
}

fn default_runway_base_url() -> String {
    runway::API_URL.to_string()
}

fn default_runway_interval() -> u64 {
    PollSettings::RUNWAY.poll_interval().as_secs()
}

fn default_runway_attempts() -> u32 {
    PollSettings::RUNWAY.max_attempts()
}

fn default_did_base_url() -> String {
    did::API_URL.to_string()
}

fn default_did_interval() -> u64 {
    PollSettings::DID.poll_interval().as_secs()
}

fn default_did_attempts() -> u32 {
    PollSettings::DID.max_attempts()
}

fn default_voice_id() -> String {
    VoiceProvider::default().voice_id
}

fn default_voice_provider() -> String {
    VoiceProvider::default().kind
}

impl Default for RunwayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_runway_base_url(),
            poll_interval_secs: default_runway_interval(),
            max_attempts: default_runway_attempts(),
        }
    }
}

impl Default for DidConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_did_base_url(),
            poll_interval_secs: default_did_interval(),
            max_attempts: default_did_attempts(),
            default_voice_id: default_voice_id(),
            default_voice_provider: default_voice_provider(),
        }
    }
}

impl RunwayConfig {
    /// Configurações de polling validadas.
    pub fn poll_settings(&self) -> Result<PollSettings, ConfigError> {
        PollSettings::from_secs(self.poll_interval_secs, self.max_attempts)
    }

    /// Retorna a chave ou [`ConfigError::MissingApiKey`] se estiver vazia.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        require_key(&self.api_key, "Runway", RUNWAY_KEY_ENV)
    }
}

impl DidConfig {
    pub fn poll_settings(&self) -> Result<PollSettings, ConfigError> {
        PollSettings::from_secs(self.poll_interval_secs, self.max_attempts)
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        require_key(&self.api_key, "D-ID", DID_KEY_ENV)
    }

    pub fn default_voice(&self) -> VoiceProvider {
        VoiceProvider::new(&self.default_voice_provider, &self.default_voice_id)
    }
}

fn require_key<'a>(
    key: &'a str,
    provider: &'static str,
    env_var: &'static str,
) -> Result<&'a str, ConfigError> {
    if key.is_empty() {
        Err(ConfigError::MissingApiKey { provider, env_var })
    } else {
        Ok(key)
    }
}

impl GenpollConfig {
    /// Carrega a configuração de `genpoll.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        let mut config = if path.exists() {
            Self::parse_file(path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Carrega de um caminho explícito; o arquivo precisa existir.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::parse_file(path)?;
        config.apply_env();
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str::<GenpollConfig>(&contents)?)
    }

    /// Aplica as variáveis de ambiente do processo.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Variável de ambiente tem precedência sobre o arquivo para as chaves API.
    /// Valores vazios são ignorados.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(RUNWAY_KEY_ENV)
            && !key.is_empty()
        {
            self.runway.api_key = key;
        }
        if let Some(key) = lookup(DID_KEY_ENV)
            && !key.is_empty()
        {
            self.did.api_key = key;
        }
    }
}
