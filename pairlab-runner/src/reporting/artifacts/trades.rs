//! Trade log export (CSV/JSON).

use anyhow::{Context, Result};
use pairlab_core::domain::{TradeAction, TradeRecord};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_trades_csv(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;
    writeln!(
        file,
        "date,pair,action,quantity,price1,price2,cost,confidence,pnl,reason"
    )?;
    for trade in trades {
        let action = match trade.action {
            TradeAction::Entry => "ENTRY",
            TradeAction::Exit => "EXIT",
        };
        writeln!(
            file,
            "{},{},{},{:.4},{:.4},{:.4},{:.6},{:.4},{},{}",
            trade.date,
            trade.pair.label(),
            action,
            trade.quantity,
            trade.price1,
            trade.price2,
            trade.cost,
            trade.confidence,
            trade.pnl.map(|p| format!("{p:.6}")).unwrap_or_default(),
            trade.reason.as_deref().unwrap_or_default(),
        )?;
    }
    Ok(())
}

pub fn write_trades_json(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(trades).context("failed to serialize trades")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write trades JSON {}", path.display()))?;
    Ok(())
}
