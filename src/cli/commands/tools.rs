//! Closed-form calculator commands.

use anyhow::Result;
use riskdesk_calc::{forex, tools};

use super::{amount, amount_or_zero};
use crate::cli::output::money;
use crate::cli::{CompoundArgs, DrawdownArgs, MarginArgs, PipArgs, ProfitArgs};

pub fn pip(args: PipArgs) -> Result<()> {
    let pip_size =
        amount(args.pip_size.as_deref()).unwrap_or_else(|| forex::pip_size(&args.symbol));
    let value = tools::pip_value(
        amount_or_zero(args.rate.as_deref()),
        amount_or_zero(Some(&args.units)),
        pip_size,
    );
    println!("Pip size:  {}", pip_size.normalize());
    println!("Pip value: ${}", money(value));
    Ok(())
}

pub fn margin(args: MarginArgs) -> Result<()> {
    let value = tools::required_margin(
        amount_or_zero(args.price.as_deref()),
        amount_or_zero(Some(&args.units)),
        amount_or_zero(Some(&args.leverage)),
    );
    println!("Required margin: ${}", money(value));
    Ok(())
}

pub fn profit(args: ProfitArgs) -> Result<()> {
    let value = tools::profit(
        amount_or_zero(args.open.as_deref()),
        amount_or_zero(args.close.as_deref()),
        amount_or_zero(Some(&args.units)),
        args.direction,
    );
    println!("{} profit: ${}", args.direction, money(value));
    Ok(())
}

pub fn compound(args: CompoundArgs) -> Result<()> {
    let principal = amount_or_zero(args.principal.as_deref());
    let result = tools::compound(
        principal,
        amount_or_zero(args.gain.as_deref()),
        args.periods,
    );
    println!("Final balance: ${}", money(result.final_balance));
    println!("Total profit:  ${}", money(result.total_profit));
    Ok(())
}

pub fn drawdown(args: DrawdownArgs) -> Result<()> {
    let value = tools::drawdown_percent(
        amount_or_zero(args.peak.as_deref()),
        amount_or_zero(args.trough.as_deref()),
    );
    println!("Drawdown: {}%", money(value));
    Ok(())
}
