//! Version command implementation.

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() {
    println!("block-access {VERSION}");
    println!();
    println!("Restricts database logins to configured week days and time windows.");
    println!();
    println!("Settings:");
    println!("  {}", block_access::settings::INTERVALS_SETTING);
    println!("  {}", block_access::settings::EXCLUDE_ROLES_SETTING);
    println!();
    println!("Build info:");
    println!("  Target: {}", std::env::consts::ARCH);
    println!("  OS:     {}", std::env::consts::OS);
}
