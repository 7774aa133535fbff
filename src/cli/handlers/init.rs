use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::store_io;

pub fn cmd_init(args: InitArgs, base: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let dir = store_io::init_dir(base, args.force)?;
    println!("Diretório eisen/ criado em {}", dir.display());
    Ok(())
}
