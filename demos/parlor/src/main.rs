//! A scripted six-player match driven through the session store.
//!
//! Seats six players, deals a seeded game, walks the first night and
//! day, and prints what each player hears. Run with
//! `RUST_LOG=debug cargo run -p parlor` for the engine's own tracing.

use belfry::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const NAMES: [&str; 6] = ["Ada", "Brin", "Cole", "Dara", "Edda", "Finn"];

#[tokio::main]
async fn main() -> Result<(), BelfryError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut store = SessionStore::new();
    let code = GameCode::new("PARLOR");
    let host = PlayerId(1);
    store.create(
        code.clone(),
        host,
        SessionConfig {
            seed: Some(2026),
            ..SessionConfig::default()
        },
    )?;

    let mut receivers = Vec::new();
    for (i, name) in NAMES.iter().enumerate() {
        let player = PlayerId(i as u64 + 1);
        let (tx, rx) = mpsc::unbounded_channel();
        store.join(player, &code, *name, tx).await?;
        receivers.push((player, *name, rx));
    }

    println!("== the table is seated; dealing ==");
    store.route_intent(host, Intent::Start).await?;

    // Remember who holds what while printing each player's inbox, so
    // the day vote can find the demon.
    let mut roles = Vec::new();
    for (player, name, rx) in &mut receivers {
        while let Ok(n) = rx.try_recv() {
            if let Notification::RoleAssigned { role } = &n {
                roles.push((*player, *role));
            }
            println!("  {name:>5} <- {n:?}");
        }
    }

    println!("\n== night passes; the town wakes ==");
    store.route_intent(host, Intent::AdvancePhase).await?;
    print_inboxes(&mut receivers);

    let demon = roles
        .iter()
        .find(|(_, role)| role.team() == Team::Demon)
        .map(|(player, _)| *player)
        .expect("a demon is always dealt");

    println!("\n== the town votes ==");
    for (player, _) in &roles {
        if *player != demon {
            store
                .route_intent(*player, Intent::Vote { target: demon })
                .await?;
        }
    }
    store
        .route_intent(host, Intent::ConfirmExecution { target: demon })
        .await?;
    print_inboxes(&mut receivers);

    Ok(())
}

fn print_inboxes(
    receivers: &mut [(PlayerId, &str, mpsc::UnboundedReceiver<Notification>)],
) {
    for (_, name, rx) in receivers {
        while let Ok(n) = rx.try_recv() {
            println!("  {name:>5} <- {n:?}");
        }
    }
}
