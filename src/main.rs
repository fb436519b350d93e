use ringsh::shell::Shell;

fn main() -> Result<(), ringsh::error::ShellError> {
    ringsh::logging::init();

    let mut shell = Shell::new()?;
    shell.run()
}
