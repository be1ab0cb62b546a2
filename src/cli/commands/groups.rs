use clap::{Arg, ArgAction, Command};

pub fn subcommand() -> Command {
    Command::new("groups")
        .about("Manage groups")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List groups, one page at a time")
                .arg(
                    Arg::new("page")
                        .long("page")
                        .help("Page number, starting at 1")
                        .default_value("1")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new("size")
                        .long("size")
                        .help("Rows per page")
                        .default_value("10")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                )
                .arg(
                    Arg::new("search")
                        .short('s')
                        .long("search")
                        .help("Filter by group name"),
                )
                .arg(
                    Arg::new("sort")
                        .long("sort")
                        .help("Sort field")
                        .default_value("name")
                        .value_parser(["name", "totalMember"]),
                )
                .arg(
                    Arg::new("order")
                        .long("order")
                        .help("Sort direction")
                        .default_value("asc")
                        .value_parser(["asc", "desc"]),
                )
                .arg(
                    Arg::new("min-members")
                        .long("min-members")
                        .help("Only groups with at least this many members")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("max-members")
                        .long("max-members")
                        .help("Only groups with at most this many members")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("Create a group")
                .arg(Arg::new("name").help("Group name, at most 50 characters").required(true)),
        )
        .subcommand(
            Command::new("edit")
                .about("Rename a group or change its member count")
                .arg(
                    Arg::new("id")
                        .help("Group id")
                        .required(true)
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("New group name")
                        .required(true),
                )
                .arg(
                    Arg::new("total-member")
                        .long("total-member")
                        .help("New member count")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete one or more groups")
                .arg(
                    Arg::new("ids")
                        .help("Group ids")
                        .required(true)
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .value_delimiter(',')
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
}
