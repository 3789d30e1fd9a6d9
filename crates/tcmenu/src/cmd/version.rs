use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("tcmenu {} ({})", env!("CARGO_PKG_VERSION"), build_target());
        return Ok(SUCCESS);
    }

    println!("name: tcmenu");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("api_version: {}", tcmenu_protocol::module_version_code());
    println!("target: {}", build_target());
    println!("profile: {}", option_env!("TCMENU_BUILD_PROFILE").unwrap_or("unknown"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "features: persist={}, async={}, cli=true",
        cfg!(feature = "persist"),
        cfg!(feature = "async")
    );

    Ok(SUCCESS)
}

fn build_target() -> &'static str {
    option_env!("TCMENU_BUILD_TARGET").unwrap_or("unknown")
}
