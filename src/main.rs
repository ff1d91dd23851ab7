use clap::{ArgGroup, Parser};
use cupidfoot::keyspec::{parse_key, parse_keys};
use cupidfoot::{
    Action, Combination, Error, KeyPress, Modifiers, Pedal, Result, Slot, TypedString,
};
use hidapi::HidApi;
use std::process;

/// Read or program one switch of the foot pedal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("pedal").required(true).args(["first", "second", "third"])
))]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["get", "short_press", "long_press", "combine", "string"])
))]
struct Cli {
    /// Select the first pedal
    #[arg(short = '1')]
    first: bool,

    /// Select the second pedal
    #[arg(short = '2')]
    second: bool,

    /// Select the third pedal
    #[arg(short = '3')]
    third: bool,

    /// Print the action currently stored in the pedal
    #[arg(long)]
    get: bool,

    /// Send KEYS once per press, e.g. "ctrl+c"
    #[arg(long, value_name = "KEYS")]
    short_press: Option<String>,

    /// Hold KEYS for as long as the pedal is held
    #[arg(long, value_name = "KEYS")]
    long_press: Option<String>,

    /// Press up to six keys together, e.g. "ctrl+a+b"
    #[arg(long, value_name = "KEYS")]
    combine: Option<String>,

    /// Type TEXT on every press
    #[arg(long, value_name = "TEXT")]
    string: Option<String>,

    /// Add modifiers to the keys given above
    #[arg(long)]
    ctrl: bool,

    #[arg(long)]
    shift: bool,

    #[arg(long)]
    alt: bool,

    #[arg(long = "super")]
    super_key: bool,
}

enum Command {
    Get,
    Set(Action),
}

impl Cli {
    fn slot(&self) -> Result<Slot> {
        let number = if self.first {
            1
        } else if self.second {
            2
        } else {
            3
        };
        Slot::from_pedal(number)
    }

    fn modifiers(&self) -> Modifiers {
        let mut mods = Modifiers::NONE;
        for (set, flag) in [
            (self.ctrl, Modifiers::CTRL),
            (self.shift, Modifiers::SHIFT),
            (self.alt, Modifiers::ALT),
            (self.super_key, Modifiers::SUPER),
        ] {
            if set {
                mods |= flag;
            }
        }
        mods
    }

    fn command(&self) -> Result<Command> {
        if self.get {
            return Ok(Command::Get);
        }
        let mods = self.modifiers();
        let action = if let Some(text) = &self.string {
            Action::TypedString(TypedString::new(text.as_str())?)
        } else if let Some(spec) = &self.short_press {
            let (key, m) = parse_key(spec)?;
            Action::ShortPress(KeyPress::new(key, mods | m))
        } else if let Some(spec) = &self.long_press {
            let (key, m) = parse_key(spec)?;
            Action::LongPress(KeyPress::new(key, mods | m))
        } else if let Some(spec) = &self.combine {
            let (keys, m) = parse_keys(spec)?;
            Action::Combination(Combination::new(keys, mods | m)?)
        } else {
            unreachable!("clap enforces one mode")
        };
        Ok(Command::Set(action))
    }
}

fn run(cli: &Cli) -> Result<()> {
    let slot = cli.slot()?;
    let command = cli.command()?;

    let hid_api = HidApi::new()?;
    // Dropping the handle releases the interface on every path out of here.
    let pedal = Pedal::open_first(&hid_api)?;

    match command {
        Command::Get => match pedal.get_switch_config(slot)? {
            Some(action) => println!("{}", action),
            None => println!("no action configured"),
        },
        Command::Set(action) => pedal.set_switch_config(slot, &action)?,
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        match e {
            Error::DeviceNotFound => eprintln!("Could not find device, is it plugged?"),
            e => eprintln!("Error: {}", e),
        }
        process::exit(1);
    }
}
