//! # Interactive Query Loop
//!
//! Read-only prompt over a finished ledger. Blocks on each input line and
//! ends on the exit token or end of input.

use gamelog_core::primitives::EXIT_TOKEN;
use gamelog_core::{ItemCatalog, ItemHoldings, Ledger, QueryCommand};
use std::io::{BufRead, Write};

/// Run the prompt until `exit` or EOF.
pub fn run_query_loop<R: BufRead, W: Write>(
    ledger: &Ledger,
    catalog: &ItemCatalog,
    top_n: usize,
    mut input: R,
    output: &mut W,
) -> std::io::Result<()> {
    writeln!(output)?;
    writeln!(output, "INTERACTIVE QUERY MODE")?;
    writeln!(output, "Enter an item_type_id (or '{}' to quit):", EXIT_TOKEN)?;

    let mut buf = Vec::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        // Undecodable bytes become an invalid command, not a read error.
        let line = String::from_utf8_lossy(&buf);
        match QueryCommand::parse(&line) {
            QueryCommand::Exit => break,
            QueryCommand::Item(item) => {
                let holdings = ItemHoldings::compute(ledger, catalog, item, top_n);
                tracing::debug!(
                    item = %item,
                    total = holdings.total,
                    holders = holdings.holders,
                    "Item query"
                );
                write!(output, "{}", holdings.render(top_n))?;
                writeln!(output)?;
            }
            QueryCommand::Invalid(text) => {
                tracing::debug!(input = %text, "Rejected query input");
                writeln!(output, "Error: enter a number or '{}'", EXIT_TOKEN)?;
            }
        }
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
