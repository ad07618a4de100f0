use c4_drv::{run, Config};

fn main() {
    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            println!("{e}");
            std::process::exit(-1);
        }
    };

    match run(&config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            println!("{e}");
            std::process::exit(-1);
        }
    }
}
