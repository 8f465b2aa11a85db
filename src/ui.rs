//! Interface de terminal do genpoll: spinner e saída colorida.
//!
//! Usa as crates `indicatif` para o spinner de progresso e `console` para
//! estilização com cores. O [`ProgressObserver`] acompanha visualmente uma
//! sessão de polling recebendo os [`PollEvent`]s do engine.

use std::time::Duration;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::polling::{Outcome, PollEvent, PollObserver, PollReport};

/// Indicador visual de progresso para uma sessão de polling no terminal.
///
/// Exibe um spinner com a tentativa atual e mensagens coloridas para
/// sucesso (verde), falha (vermelho) e retentativa (amarelo).
pub struct ProgressObserver {
    // Spinner do indicatif.
    pb: ProgressBar,
    green: Style,
    red: Style,
    yellow: Style,
}

impl ProgressObserver {
    /// Inicia o spinner com a descrição do job.
    pub fn start(description: &str) -> Self {
        Self::with_bar(ProgressBar::new_spinner(), description)
    }

    fn with_bar(pb: ProgressBar, description: &str) -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(format!("SUBMITTED: {description}"));
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            yellow: Style::new().yellow(),
        }
    }

    /// Remove o spinner sem imprimir nada.
    pub fn clear(&self) {
        self.pb.finish_and_clear();
    }

    /// Finaliza o spinner e exibe o resultado final.
    ///
    /// Sucesso em verde com checkmark; falha e timeout em vermelho com X.
    pub fn complete(&self, outcome: &Outcome) {
        self.pb.finish_and_clear();
        match outcome {
            Outcome::Success { result_url } => {
                println!("  {} Job completed: {result_url}", self.green.apply_to("✓"));
            }
            Outcome::Failure { reason } => {
                println!("  {} Job failed: {reason}", self.red.apply_to("✗"));
            }
            Outcome::TimedOut { attempts } => {
                println!(
                    "  {} Job still running after {attempts} attempts",
                    self.red.apply_to("✗")
                );
            }
        }
    }

    /// Imprime o relatório da sessão em JSON com estilo colorido.
    pub fn print_report(&self, report: &PollReport) {
        let style = if report.outcome.is_success() {
            &self.green
        } else {
            &self.red
        };
        println!();
        println!("{}", style.apply_to("─── Poll Report ───"));
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_default()
        );
    }
}

// Limpa o spinner quando o comando sai por erro antes de `complete`.
impl Drop for ProgressObserver {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}

impl PollObserver for ProgressObserver {
    fn on_event(&self, event: &PollEvent<'_>) {
        match *event {
            PollEvent::AttemptStarted {
                job_id,
                attempt,
                max_attempts,
            } => {
                self.pb
                    .set_message(format!("POLLING: {job_id} ({attempt}/{max_attempts})"));
            }
            PollEvent::Classified {
                job_id,
                token,
                status,
                ..
            } => {
                self.pb.set_message(format!(
                    "{status}: {job_id} [{}]",
                    token.unwrap_or("<missing>")
                ));
            }
            PollEvent::AttemptFailed {
                attempt,
                error,
                will_retry: true,
                ..
            } => {
                self.pb.println(format!(
                    "  {} Retry after attempt {attempt}: {error}",
                    self.yellow.apply_to("↻")
                ));
            }
            PollEvent::AttemptFailed { .. } => {}
            PollEvent::Sleeping { job_id, delay, .. } => {
                self.pb
                    .set_message(format!("WAITING: {job_id} ({}s)", delay.as_secs()));
            }
            PollEvent::Finished { .. } | PollEvent::Aborted { .. } => {}
        }
    }
}
