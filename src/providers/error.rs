//! Tipos de erro para os clientes HTTP dos provedores.
//!
//! Define [`TransportError`] para falhas ao consultar um provedor e
//! [`SubmitError`] para falhas na criação de um job. Usa `thiserror` para
//! derivar `Display` e `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao falar com a API de um provedor.
///
/// - [`Network`](TransportError::Network) — falha na camada de rede
/// - [`Api`](TransportError::Api) — o servidor respondeu com status fora de 2xx
/// - [`MalformedBody`](TransportError::MalformedBody) — o corpo não é um objeto JSON
#[derive(Debug, Error)]
pub enum TransportError {
    /// Falha de rede subjacente (DNS, conexão recusada, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Erro retornado pela API (ex.: 401 chave inválida, 500 erro interno).
    /// Contém o código de status HTTP e o texto do corpo da resposta.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// A resposta foi 2xx mas o corpo não pôde ser lido como objeto JSON.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

/// Erros ao submeter um novo job a um provedor.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("job submission failed: {0}")]
    Transport(#[from] TransportError),

    /// A resposta de criação não trouxe um `id` utilizável.
    #[error("{provider} job submission did not return a job id")]
    MissingJobId { provider: &'static str },

    /// Parâmetros rejeitados antes de qualquer chamada de rede.
    #[error("invalid job request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = TransportError::Api {
            status: 401,
            message: "Invalid API key".into(),
        };
        assert_eq!(err.to_string(), "API error (status 401): Invalid API key");
    }

    #[test]
    fn missing_job_id_display() {
        let err = SubmitError::MissingJobId { provider: "runway" };
        assert_eq!(
            err.to_string(),
            "runway job submission did not return a job id"
        );
    }

    #[test]
    fn submit_error_wraps_transport() {
        let err: SubmitError = TransportError::MalformedBody("not json".into()).into();
        assert_eq!(
            err.to_string(),
            "job submission failed: malformed response body: not json"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransportError>();
        assert_send_sync::<SubmitError>();
    }
}
