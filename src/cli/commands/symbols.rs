//! List built-in instruments.

use anyhow::Result;
use riskdesk_core::types::AssetClass;
use riskdesk_feeds::coin_id;

use crate::cli::SymbolsArgs;

pub fn run(args: SymbolsArgs) -> Result<()> {
    let classes: Vec<AssetClass> = match args.asset_class {
        Some(class) => vec![class],
        None => AssetClass::all().to_vec(),
    };

    for class in classes {
        println!("{}:", class);
        for symbol in class.symbols() {
            if class == AssetClass::Crypto {
                println!("  {:<10} {}", symbol, coin_id(symbol));
            } else {
                println!("  {}", symbol);
            }
        }
        println!();
    }
    Ok(())
}
