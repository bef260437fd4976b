fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match winswitch_core::runtime::parse_cli_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("[winswitch-core] {error}");
            eprintln!("{}", winswitch_core::runtime::usage());
            std::process::exit(2);
        }
    };

    if let Err(error) = winswitch_core::runtime::run_with_options(options) {
        eprintln!("[winswitch-core] runtime failed: {error}");
        std::process::exit(1);
    }
}
