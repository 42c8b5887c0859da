//! Line-oriented shell driving the order form against a live endpoint
//!
//! Usage: `cargo run --example order_cli [config.yaml]`
//!
//! Commands:
//!   name <full name>      set the full name
//!   size <S|M|L>          set the size
//!   topping <id> on|off   check or uncheck a topping
//!   show                  print the form
//!   submit                send the order
//!   quit                  leave

use pizza_order::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

fn print_view(view: &FormView) {
    println!("Full name: {:?}", view.draft.full_name);
    if let Some(error) = view.error(Field::FullName) {
        println!("  ! {}", error);
    }
    println!("Size: {:?}", view.draft.size);
    if let Some(error) = view.error(Field::Size) {
        println!("  ! {}", error);
    }
    for option in &view.toppings {
        let mark = if option.checked { "x" } else { " " };
        println!("  [{}] {} {}", mark, option.id, option.label);
    }
    if let Some(message) = view.success() {
        println!("OK: {}", message);
    }
    if let Some(message) = view.failure() {
        println!("FAILED: {}", message);
    }
    println!(
        "Submit: {}",
        if view.submit_enabled { "enabled" } else { "disabled" }
    );
}

async fn handle(form: &OrderFormController<HttpOrderSubmitter>, line: &str) -> anyhow::Result<bool> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "name" => {
            form.set_field(Field::FullName, rest)?.settled().await?;
            print_view(&form.view());
        }
        "size" => {
            form.set_field(Field::Size, rest.trim())?.settled().await?;
            print_view(&form.view());
        }
        "topping" => {
            let (id, state) = rest.split_once(' ').unwrap_or((rest, "on"));
            form.set_topping(id, state.trim() != "off")?;
            print_view(&form.view());
        }
        "show" => print_view(&form.view()),
        "submit" => {
            if !form.is_submit_enabled() {
                println!("Submit is disabled");
                return Ok(true);
            }
            form.submit().await?;
            print_view(&form.view());
        }
        "quit" | "exit" => return Ok(false),
        "" => {}
        other => println!("Unknown command: {}", other),
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pizza_order=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => FormConfig::from_yaml_file(&path)?,
        None => FormConfig::default_config(),
    };
    let form = OrderFormController::from_config(&config)?;
    tracing::info!(endpoint = %config.endpoint, toppings = config.toppings.len(), "Order form ready");

    print_view(&form.view());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match handle(&form, line.trim_end()).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}
