use std::{io::Write, sync::Arc};

use tokio::io::{AsyncBufReadExt, BufReader};
use weather_core::{Msg, Session, View, WeatherProvider, WeatherWidget};

const QUIT: &str = ":q";

/// Interactive loop: every stdin line is typed into the search box and
/// submitted, `:q` or end of input closes the widget.
pub async fn run(provider: Arc<dyn WeatherProvider>, widget: WeatherWidget) -> anyhow::Result<()> {
    let session = Session::new(provider, widget);
    let tx = session.sender();

    eprintln!("Type a city and press Enter ({QUIT} to quit).");

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim() == QUIT => break,
                Ok(Some(line)) => {
                    if tx.send(Msg::Input(line)).is_err() || tx.send(Msg::Submit).is_err() {
                        return;
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to read from stdin");
                    break;
                }
            }
        }
        let _ = tx.send(Msg::Quit);
    });

    let mut stdout = std::io::stdout();
    session
        .run(|view| {
            if let Err(err) = draw(&mut stdout, view) {
                tracing::warn!(error = %err, "failed to draw widget");
            }
        })
        .await;

    Ok(())
}

fn draw(out: &mut impl Write, view: &View) -> std::io::Result<()> {
    writeln!(out, "{}", "─".repeat(40))?;
    write!(out, "{view}")?;
    out.flush()
}
