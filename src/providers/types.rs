//! Corpos de requisição para criação de jobs nos provedores.
//!
//! [`RunwayTask`] descreve uma tarefa de texto→imagem ou imagem→vídeo;
//! [`TalkRequest`] descreve um vídeo de avatar falante do D-ID.
//! Opções extras são mescladas por cima do payload base, podendo
//! sobrescrever qualquer campo (inclusive `model`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::error::SubmitError;

/// Parâmetros adicionais repassados como estão para o provedor.
pub type Options = Map<String, Value>;

/// Modelo usado para gerar imagens a partir de texto.
pub const TEXT_TO_IMAGE_MODEL: &str = "gen4_image";

/// Modelo usado para gerar vídeos a partir de uma imagem.
pub const IMAGE_TO_VIDEO_MODEL: &str = "gen4_turbo";

/// Nome da opção que carrega a imagem de referência de estilo.
pub const STYLE_REFERENCE_OPTION: &str = "style_reference_image_url";

/// Uma tarefa a ser criada em `POST /v1/tasks` da Runway.
#[derive(Debug, Clone, PartialEq)]
pub enum RunwayTask {
    TextToImage {
        prompt: String,
        options: Options,
    },
    ImageToVideo {
        image_url: String,
        prompt: Option<String>,
        options: Options,
    },
}

impl RunwayTask {
    pub fn text_to_image(prompt: impl Into<String>) -> Self {
        RunwayTask::TextToImage {
            prompt: prompt.into(),
            options: Options::new(),
        }
    }

    pub fn image_to_video(image_url: impl Into<String>, prompt: Option<String>) -> Self {
        RunwayTask::ImageToVideo {
            image_url: image_url.into(),
            prompt,
            options: Options::new(),
        }
    }

    /// Mescla `extra` sobre as opções atuais; chaves repetidas são substituídas.
    pub fn with_options(mut self, extra: Options) -> Self {
        self.options_mut().extend(extra);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options_mut().insert(key.into(), value.into());
        self
    }

    pub fn options(&self) -> &Options {
        match self {
            RunwayTask::TextToImage { options, .. } | RunwayTask::ImageToVideo { options, .. } => {
                options
            }
        }
    }

    fn options_mut(&mut self) -> &mut Options {
        match self {
            RunwayTask::TextToImage { options, .. } | RunwayTask::ImageToVideo { options, .. } => {
                options
            }
        }
    }

    /// Monta o corpo JSON enviado à API.
    pub fn payload(&self) -> Value {
        let mut payload = Options::new();
        match self {
            RunwayTask::TextToImage { prompt, .. } => {
                payload.insert("model".into(), TEXT_TO_IMAGE_MODEL.into());
                payload.insert("prompt".into(), prompt.as_str().into());
            }
            RunwayTask::ImageToVideo {
                image_url, prompt, ..
            } => {
                payload.insert("model".into(), IMAGE_TO_VIDEO_MODEL.into());
                payload.insert("image_url".into(), image_url.as_str().into());
                // Prompt vazio é tratado como ausente.
                if let Some(prompt) = prompt.as_deref().filter(|p| !p.is_empty()) {
                    payload.insert("prompt".into(), prompt.into());
                }
            }
        }
        payload.extend(self.options().clone());
        Value::Object(payload)
    }
}

/// Provedor de TTS usado quando o roteiro é texto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProvider {
    #[serde(rename = "type")]
    pub kind: String,
    pub voice_id: String,
}

impl VoiceProvider {
    pub fn new(kind: impl Into<String>, voice_id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            voice_id: voice_id.into(),
        }
    }
}

impl Default for VoiceProvider {
    fn default() -> Self {
        Self::new("microsoft", "en-US-JennyNeural")
    }
}

/// Roteiro falado pelo avatar: texto sintetizado ou áudio pronto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TalkScript {
    Text {
        input: String,
        provider: VoiceProvider,
    },
    Audio {
        audio_url: String,
    },
}

/// Requisição para `POST /talks` do D-ID.
#[derive(Debug, Clone, PartialEq)]
pub struct TalkRequest {
    source_url: String,
    script: TalkScript,
    config: Options,
}

impl TalkRequest {
    /// Valida e monta uma requisição.
    ///
    /// Exatamente um entre `script_text` e `script_audio_url` deve estar
    /// presente; strings vazias contam como ausentes. Sem `provider`, roteiros
    /// de texto usam [`VoiceProvider::default`].
    pub fn new(
        image_url: impl Into<String>,
        script_text: Option<String>,
        script_audio_url: Option<String>,
        provider: Option<VoiceProvider>,
    ) -> Result<Self, SubmitError> {
        let script_text = script_text.filter(|s| !s.is_empty());
        let script_audio_url = script_audio_url.filter(|s| !s.is_empty());

        let script = match (script_text, script_audio_url) {
            (Some(input), None) => TalkScript::Text {
                input,
                provider: provider.unwrap_or_default(),
            },
            (None, Some(audio_url)) => TalkScript::Audio { audio_url },
            (None, None) => {
                return Err(SubmitError::InvalidRequest(
                    "either script text or script audio URL must be provided".into(),
                ));
            }
            (Some(_), Some(_)) => {
                return Err(SubmitError::InvalidRequest(
                    "provide either script text or script audio URL, not both".into(),
                ));
            }
        };

        Ok(Self {
            source_url: image_url.into(),
            script,
            config: Options::new(),
        })
    }

    /// Atalho para um roteiro de texto.
    pub fn text(
        image_url: impl Into<String>,
        text: impl Into<String>,
        provider: VoiceProvider,
    ) -> Result<Self, SubmitError> {
        Self::new(image_url, Some(text.into()), None, Some(provider))
    }

    /// Configuração extra do talk (ex.: `config`, `face`), mesclada no payload.
    pub fn with_config(mut self, config: Options) -> Self {
        self.config.extend(config);
        self
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn script(&self) -> &TalkScript {
        &self.script
    }

    pub fn payload(&self) -> Value {
        let mut payload = Options::new();
        payload.insert("source_url".into(), self.source_url.as_str().into());
        payload.insert("script".into(), json!(self.script));
        payload.extend(self.config.clone());
        Value::Object(payload)
    }
}
