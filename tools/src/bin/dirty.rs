use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use dirty::bridge::{Host, HostBridge};
use dirty::codec::Encoder;
use dirty::path::Path;
use dirty::source::{FileSource, TagSource};
use dirty::Tag;
use dirty_tools::{ErrorMessage, Format, Result};
use env_logger::Env;
use log::{error, info};

fn required<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.value_of(name)
        .ok_or_else(|| ErrorMessage(format!("missing argument {}", name)).into())
}

fn path_arg(args: &ArgMatches) -> Result<Path> {
    Ok(required(args, "path")?.parse()?)
}

fn encoder(args: &ArgMatches) -> Encoder {
    if args.is_present("lossy") {
        Encoder::lossy()
    } else {
        Encoder::strict()
    }
}

fn format(args: &ArgMatches) -> Format {
    Format::new(args.is_present("pretty"), args.is_present("snbt"))
}

fn data_version(args: &ArgMatches) -> Result<Option<i32>> {
    match args.value_of("data-version") {
        Some(v) => Ok(Some(v.parse().map_err(|_| {
            ErrorMessage(format!("data version must be a number, got {:?}", v))
        })?)),
        None => Ok(None),
    }
}

/// Print to stdout, or log at info level with `--console`.
fn output(args: &ArgMatches, text: &str) {
    if args.is_present("console") {
        info!("{}", text);
    } else {
        println!("{}", text);
    }
}

fn read(args: &ArgMatches) -> Result<Tag> {
    Ok(FileSource::new(required(args, "file")?).read()?)
}

/// Run `f` on the file's tree and store it, either back in place or in the
/// `--out` file.
fn edit<F>(args: &ArgMatches, f: F) -> Result<()>
where
    F: FnOnce(&mut Tag) -> Result<()>,
{
    let mut source = FileSource::new(required(args, "file")?);
    let mut tag = source.read()?;
    f(&mut tag)?;
    match args.value_of("out") {
        Some(out) => source.with_path(out).write(tag)?,
        None => source.write(tag)?,
    }
    Ok(())
}

fn show(args: &ArgMatches) -> Result<()> {
    let tag = read(args)?;
    output(args, &dirty_tools::render(&tag, format(args))?);
    Ok(())
}

fn get(args: &ArgMatches) -> Result<()> {
    let tag = read(args)?;
    output(args, &dirty_tools::get(&tag, &path_arg(args)?, format(args))?);
    Ok(())
}

fn set(args: &ArgMatches) -> Result<()> {
    let path = path_arg(args)?;
    let value = required(args, "json")?;
    let encoder = encoder(args);
    edit(args, |tag| dirty_tools::set(tag, &path, value, &encoder))?;
    info!("set {}", path);
    Ok(())
}

fn append(args: &ArgMatches) -> Result<()> {
    let path = path_arg(args)?;
    let value = required(args, "json")?;
    let encoder = encoder(args);
    edit(args, |tag| dirty_tools::append(tag, &path, value, &encoder))?;
    info!("appended to {}", path);
    Ok(())
}

/// The bridge for `--data-version`, or for the version recorded in `root`.
fn bridge(args: &ArgMatches, root: &Tag) -> Result<&'static dyn HostBridge> {
    let host = match data_version(args)? {
        Some(v) => Host::new(v),
        None => Host::detect(root)?,
    };
    let bridge = host.bridge()?;
    info!("data version {}, using {}", host.data_version(), bridge.name());
    Ok(bridge)
}

fn item(args: &ArgMatches) -> Result<()> {
    let tag = read(args)?;
    let bridge = bridge(args, &tag)?;
    output(
        args,
        &dirty_tools::item(&tag, &path_arg(args)?, bridge, format(args))?,
    );
    Ok(())
}

fn item_set(args: &ArgMatches) -> Result<()> {
    let path = path_arg(args)?;
    let value = required(args, "json")?;
    let encoder = encoder(args);
    edit(args, |tag| {
        let bridge = bridge(args, tag)?;
        dirty_tools::set_item(tag, &path, value, bridge, &encoder)
    })?;
    info!("set item data at {}", path);
    Ok(())
}

fn block(args: &ArgMatches) -> Result<()> {
    let tag = read(args)?;
    let mut pos = [0; 3];
    for (p, axis) in pos.iter_mut().zip(["x", "y", "z"]) {
        let v = required(args, axis)?;
        *p = v
            .parse()
            .map_err(|_| ErrorMessage(format!("{} must be a number, got {:?}", axis, v)))?;
    }
    output(args, &dirty_tools::block(&tag, pos, format(args))?);
    Ok(())
}

fn entity(args: &ArgMatches) -> Result<()> {
    let tag = read(args)?;
    output(
        args,
        &dirty_tools::entity(&tag, required(args, "uuid")?, format(args))?,
    );
    Ok(())
}

fn skull(args: &ArgMatches) -> Result<()> {
    let version = data_version(args)?.ok_or_else(|| {
        ErrorMessage("skull needs --data-version or DIRTY_DATA_VERSION".to_owned())
    })?;
    let host = Host::new(version);
    let skull = host
        .bridge()?
        .skull(required(args, "id")?, required(args, "texture")?)?;

    let out = required(args, "out")?;
    FileSource::new(out).write(skull.clone())?;
    info!("wrote {}", out);
    output(args, &skull.to_string());
    Ok(())
}

fn structures(args: &ArgMatches) -> Result<()> {
    let tag = read(args)?;
    output(
        args,
        &dirty_tools::structures(&tag, args.is_present("pretty"))?,
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let file = || {
        Arg::with_name("file")
            .takes_value(true)
            .required(true)
            .help("NBT file, gzip compressed or not")
    };
    let path = || {
        Arg::with_name("path")
            .takes_value(true)
            .required(true)
            .help("path to a node, eg Inventory[0].tag")
    };
    let json = || {
        Arg::with_name("json")
            .takes_value(true)
            .required(true)
            .help("JSON value")
    };
    let pretty = || Arg::with_name("pretty").long("pretty").help("indent JSON output");
    let snbt = || Arg::with_name("snbt").long("snbt").help("print SNBT instead of JSON");
    let console = || {
        Arg::with_name("console")
            .long("console")
            .help("log the output instead of printing it")
    };
    let out = || {
        Arg::with_name("out")
            .long("out")
            .takes_value(true)
            .help("write the result here instead of back to the file")
    };
    let lossy = || {
        Arg::with_name("lossy")
            .long("lossy")
            .help("truncate integers to 32 bits and trust list contents")
    };
    let data_version = || {
        Arg::with_name("data-version")
            .long("data-version")
            .takes_value(true)
            .env("DIRTY_DATA_VERSION")
            .help("game data version, eg 3465 for 1.20.1")
    };

    let coord = |name: &'static str| {
        Arg::with_name(name)
            .takes_value(true)
            .required(true)
            .allow_hyphen_values(true)
    };

    let matches = App::new("dirty")
        .about("read and edit Minecraft NBT files")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("show")
                .about("print a whole file")
                .arg(file())
                .arg(pretty())
                .arg(snbt())
                .arg(console()),
        )
        .subcommand(
            SubCommand::with_name("get")
                .about("print the node at a path")
                .arg(file())
                .arg(path())
                .arg(pretty())
                .arg(snbt())
                .arg(console()),
        )
        .subcommand(
            SubCommand::with_name("set")
                .about("set or remove (with null) the node at a path")
                .arg(file())
                .arg(path())
                .arg(json())
                .arg(out())
                .arg(lossy()),
        )
        .subcommand(
            SubCommand::with_name("append")
                .about("append to the list at a path")
                .arg(file())
                .arg(path())
                .arg(json())
                .arg(out())
                .arg(lossy()),
        )
        .subcommand(
            SubCommand::with_name("item")
                .about("print the custom data of the item at a path")
                .arg(file())
                .arg(path())
                .arg(data_version())
                .arg(pretty())
                .arg(snbt())
                .arg(console()),
        )
        .subcommand(
            SubCommand::with_name("item-set")
                .about("set or remove (with null) the custom data of the item at a path")
                .arg(file())
                .arg(path())
                .arg(json())
                .arg(data_version())
                .arg(out())
                .arg(lossy()),
        )
        .subcommand(
            SubCommand::with_name("block")
                .about("print the block entity at a position of a chunk")
                .arg(file())
                .arg(coord("x"))
                .arg(coord("y"))
                .arg(coord("z"))
                .arg(pretty())
                .arg(snbt())
                .arg(console()),
        )
        .subcommand(
            SubCommand::with_name("entity")
                .about("print the entity with a UUID")
                .arg(file())
                .arg(
                    Arg::with_name("uuid")
                        .takes_value(true)
                        .required(true)
                        .help("hyphenated or plain hex UUID"),
                )
                .arg(pretty())
                .arg(snbt())
                .arg(console()),
        )
        .subcommand(
            SubCommand::with_name("skull")
                .about("write a player head item")
                .arg(Arg::with_name("id").takes_value(true).required(true))
                .arg(Arg::with_name("texture").takes_value(true).required(true))
                .arg(Arg::with_name("out").takes_value(true).required(true))
                .arg(data_version())
                .arg(console()),
        )
        .subcommand(
            SubCommand::with_name("structures")
                .about("list the structures starting in a chunk")
                .arg(file())
                .arg(pretty())
                .arg(console()),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("show", Some(args)) => show(args),
        ("get", Some(args)) => get(args),
        ("set", Some(args)) => set(args),
        ("append", Some(args)) => append(args),
        ("item", Some(args)) => item(args),
        ("item-set", Some(args)) => item_set(args),
        ("block", Some(args)) => block(args),
        ("entity", Some(args)) => entity(args),
        ("skull", Some(args)) => skull(args),
        ("structures", Some(args)) => structures(args),
        _ => {
            error!("{}", matches.usage());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
