use std::collections::VecDeque;

use anyhow::{anyhow, Context, Result};
use cfg_if::cfg_if;
use log::{debug, log_enabled, warn, Level};

#[cfg(feature = "tui")]
mod tui;

fn main() -> Result<()> {
    env_logger::init();

    println!("calcr {}", env!("CARGO_PKG_VERSION"));

    cfg_if! {
    if #[cfg(feature = "tui")] {
        tui::drive()?
    } else {
        plain_drive()?
    }
    }

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn plain_drive() -> Result<()> {
    use std::io::{self, Write};

    let mut buffer = String::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        stdout.write_all(b"> ")?; //prompt
        stdout.flush()?;
        buffer.clear();
        if stdin.read_line(&mut buffer)? == 0 {
            // end of stream
            break;
        }

        if eval(&buffer)? == EvalState::Done {
            break;
        }
    }

    Ok(())
}

#[derive(Eq, PartialEq)]
enum EvalState {
    Regular,
    Done,
}

// A failed line is reported and the loop moves on to the next one; only I/O
// trouble on stdin/stdout aborts the run.
fn eval(buffer: &str) -> Result<EvalState> {
    let buffer = buffer.trim();
    if "exit" == buffer {
        return Ok(EvalState::Done);
    }
    if buffer.is_empty() {
        return Ok(EvalState::Regular);
    }

    match scan_eval(buffer) {
        Ok(value) => println!("{value}"),
        Err(e) => {
            warn!("{:?}", e);
            let mut stack: VecDeque<_> = e.chain().rev().collect();

            println!(
                "error: {}",
                stack
                    .pop_front()
                    .expect("chain contains at least the error")
            );

            for error in stack {
                println!("cause: {}", error);
            }
        }
    }

    Ok(EvalState::Regular)
}

fn scan_eval(line: &str) -> Result<i64> {
    if log_enabled!(Level::Debug) {
        debug!("tokens: {:?}", calcr::scan(line));
    }
    calcr::eval_line(line).with_context(|| anyhow!("evaluating {:?}", line))
}
