use studiogrid::cli::run;

fn main() {
    // Windows terminals need ANSI support switched on; failure just means no colors
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        // Anything that reaches here is an internal failure; user errors exit
        // earlier with code 1
        eprintln!("Internal error: {}", e);
        let mut source = e.source();
        if source.is_some() {
            eprintln!("\nCaused by:");
            let mut indent = 1;
            while let Some(err) = source {
                eprintln!("{:indent$}  {}", "", err);
                source = err.source();
                indent += 1;
            }
        }
        std::process::exit(2);
    }
}
