use tokio::io::{AsyncBufReadExt, BufReader};

use cinesearch::{
    services::{DetailSession, SearchSession},
    telemetry, AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(&config.log_filter)?;

    let state = AppState::from_config(&config, false);
    let search = state.search_session();
    let detail = state.detail_session();

    println!("Theme: {}", state.theme().await.label());
    print_search(&search).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" => break,
            ":more" => {
                search.load_more().await;
                print_search(&search).await;
            }
            ":clear" => {
                search.clear().await;
                print_search(&search).await;
            }
            ":theme" => match state.toggle_theme().await {
                Ok(theme) => println!("Theme: {}", theme.label()),
                Err(e) => tracing::warn!(error = %e, "Failed to save theme"),
            },
            command if command.starts_with(":open ") => {
                detail.load(&command[":open ".len()..]).await;
                print_detail(&detail).await;
            }
            command if command.starts_with(":peek ") => {
                if let Some(preview) = search.open_details(&command[":peek ".len()..]).await {
                    println!("{}", preview.title);
                    if let Some(plot) = &preview.plot {
                        println!("{}", plot);
                    }
                }
                search.close_details().await;
            }
            _ => match search.set_query(&line).await {
                // Printed on completion unless newer input has replaced it
                Some(pending) => {
                    let search = search.clone();
                    let query = line.clone();
                    tokio::spawn(async move {
                        if pending.await.is_ok() && search.snapshot().await.query == query {
                            print_search(&search).await;
                        }
                    });
                }
                None => print_search(&search).await,
            },
        }
    }

    search.close();
    detail.close();
    Ok(())
}

async fn print_search(session: &SearchSession) {
    let view = session.snapshot().await;
    println!("{}", view.status);
    for item in &view.results {
        println!("  {}  {} ({})  {:?}", item.id, item.title, item.year, item.title_type);
    }
}

async fn print_detail(session: &DetailSession) {
    let view = session.snapshot().await;
    if let Some(movie) = &view.movie {
        println!("{}", movie.title);
        println!("{}", movie.meta_line());
        if let Some(plot) = &movie.plot {
            println!("{}", plot);
        }
        for item in &view.recommendations.items {
            println!("  -> {}  {} ({})", item.id, item.title, item.year);
        }
    } else {
        println!("{}", view.status);
    }
}
