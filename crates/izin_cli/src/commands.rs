//! Subcommand handlers over the state container.

use crate::cli::{
    CategoryCommand, Command, HistoryCommand, ProfileArgs, ProfileCommand, RenderArgs,
    ScheduleCommand, TemplateCommand,
};
use chrono::{Local, TimeZone};
use izin_core::model::schedule::entries_for_day;
use izin_core::render::unresolved_placeholders;
use izin_core::{
    compute_teaching_periods, export_file_name, format_display_time, total_teaching_periods,
    whatsapp_share_url, Action, Day, EntryId, HistoryItem, LetterForm, ScheduleEntry,
    StateContainer, StateRepository, Template, UserProfile,
};
use std::path::PathBuf;

type CmdResult = Result<(), String>;

pub fn execute<R: StateRepository>(container: &mut StateContainer<R>, command: Command) -> CmdResult {
    match command {
        Command::Profile(command) => profile(container, command),
        Command::Schedule(command) => schedule(container, command),
        Command::Template(command) => template(container, command),
        Command::Category(command) => category(container, command),
        Command::Render(args) => render(container, args),
        Command::History(command) => history(container, command),
        Command::Export { out } => export(container, out),
        Command::Import { file } => import(container, file),
        Command::Share { id } => {
            let item = find_history(container.state().history.as_slice(), id)?;
            println!("{}", whatsapp_share_url(&item.text));
            Ok(())
        }
        Command::Jp { start, end } => {
            println!("{} JP", compute_teaching_periods(&start, &end));
            Ok(())
        }
        Command::Theme { theme } => apply(container, Action::SetTheme(theme.into())),
        Command::Layout { layout } => apply(container, Action::SetLayout(layout.into())),
    }
}

fn apply<R: StateRepository>(container: &mut StateContainer<R>, action: Action) -> CmdResult {
    container
        .dispatch(action)
        .map(|_| ())
        .map_err(|err| err.to_string())
}

fn profile<R: StateRepository>(
    container: &mut StateContainer<R>,
    command: ProfileCommand,
) -> CmdResult {
    match command {
        ProfileCommand::Show => {
            print_profile(&container.state().profile);
            Ok(())
        }
        ProfileCommand::Set(args) => {
            let updated = merge_profile(container.state().profile.clone(), args);
            apply(container, Action::UpdateProfile(updated))?;
            print_profile(&container.state().profile);
            Ok(())
        }
    }
}

fn merge_profile(mut profile: UserProfile, args: ProfileArgs) -> UserProfile {
    let fields = [
        (&mut profile.name, args.name),
        (&mut profile.identifier, args.identifier),
        (&mut profile.unit, args.unit),
        (&mut profile.employment_status, args.employment_status),
        (&mut profile.position, args.position),
        (&mut profile.additional_position, args.additional_position),
        (&mut profile.workload, args.workload),
        (&mut profile.start_time, args.start_time),
        (&mut profile.end_time, args.end_time),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            *field = value;
        }
    }
    profile
}

fn print_profile(profile: &UserProfile) {
    println!("Nama              : {}", profile.name);
    println!("NIP               : {}", profile.identifier);
    println!("Unit              : {}", profile.unit);
    println!("Status            : {}", profile.employment_status);
    println!("Jabatan           : {}", profile.position);
    println!("Jabatan tambahan  : {}", profile.additional_position);
    println!("Beban kerja       : {}", profile.workload);
    println!(
        "Jam kerja         : {} - {}",
        format_display_time(&profile.start_time),
        format_display_time(&profile.end_time)
    );
}

fn schedule<R: StateRepository>(
    container: &mut StateContainer<R>,
    command: ScheduleCommand,
) -> CmdResult {
    match command {
        ScheduleCommand::List { day } => {
            let days = match day {
                Some(day) => vec![day],
                None => Day::ALL.to_vec(),
            };
            for day in days {
                let entries = entries_for_day(&container.state().schedules, day);
                if entries.is_empty() {
                    continue;
                }
                println!(
                    "{day} ({} JP)",
                    total_teaching_periods(entries.iter().copied())
                );
                for entry in entries {
                    println!(
                        "  {}  {}-{}  {} {} ({}) {}",
                        entry.id,
                        format_display_time(&entry.start_time),
                        format_display_time(&entry.end_time),
                        entry.subject,
                        entry.class_name,
                        entry.level,
                        entry.note
                    );
                }
            }
            Ok(())
        }
        ScheduleCommand::Add {
            day,
            subject,
            class_name,
            level,
            start,
            end,
            note,
        } => {
            let entry =
                ScheduleEntry::new(day, subject, class_name, level, start, end).with_note(note);
            let id = entry.id;
            apply(container, Action::AddSchedule(entry))?;
            println!("{id}");
            Ok(())
        }
        ScheduleCommand::Remove { id } => apply(container, Action::DeleteSchedule(id)),
    }
}

fn template<R: StateRepository>(
    container: &mut StateContainer<R>,
    command: TemplateCommand,
) -> CmdResult {
    match command {
        TemplateCommand::List => {
            for template in &container.state().templates {
                println!(
                    "{}  {}  [{}]",
                    template.id,
                    template.name,
                    template.category.as_deref().unwrap_or("-")
                );
            }
            Ok(())
        }
        TemplateCommand::Show { id } => {
            let template = container
                .state()
                .templates
                .iter()
                .find(|template| template.id == id)
                .ok_or_else(|| format!("template not found: {id}"))?;
            println!("{}", template.body);
            Ok(())
        }
        TemplateCommand::Add {
            name,
            file,
            category,
        } => {
            let body = std::fs::read_to_string(&file)
                .map_err(|err| format!("cannot read `{}`: {err}", file.display()))?;
            let template = Template::new(name, body, category);
            let id = template.id;
            apply(container, Action::AddTemplate(template))?;
            println!("{id}");
            Ok(())
        }
        TemplateCommand::Remove { id } => apply(container, Action::DeleteTemplate(id)),
    }
}

fn category<R: StateRepository>(
    container: &mut StateContainer<R>,
    command: CategoryCommand,
) -> CmdResult {
    match command {
        CategoryCommand::List => {
            for name in &container.state().categories {
                println!("{name}");
            }
            Ok(())
        }
        CategoryCommand::Add { name } => apply(container, Action::AddCategory(name)),
        CategoryCommand::Remove { name } => apply(container, Action::DeleteCategory(name)),
    }
}

fn render<R: StateRepository>(container: &mut StateContainer<R>, args: RenderArgs) -> CmdResult {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let form = LetterForm {
        category: args.category,
        reason: args.reason,
        halaqah_group: args.halaqah_group,
        halaqah_substitute: args.halaqah_substitute,
    };

    let letter = container
        .generate_letter(&form, date)
        .map_err(|err| err.to_string())?;
    println!("{}", letter.text);

    let unresolved = unresolved_placeholders(&letter.text);
    if !unresolved.is_empty() {
        eprintln!("warning: unknown placeholders left as-is: {}", unresolved.join(", "));
    }
    if args.save {
        let id = container
            .save_history(form.category.as_str(), letter.text.as_str())
            .map_err(|err| err.to_string())?;
        eprintln!("saved to history: {id}");
    }
    if args.share {
        println!("{}", whatsapp_share_url(&letter.text));
    }
    Ok(())
}

fn history<R: StateRepository>(
    container: &mut StateContainer<R>,
    command: HistoryCommand,
) -> CmdResult {
    match command {
        HistoryCommand::List => {
            for item in &container.state().history {
                println!(
                    "{}  {}  {}",
                    item.id,
                    format_timestamp(item.created_at),
                    item.category
                );
            }
            Ok(())
        }
        HistoryCommand::Show { id } => {
            let item = find_history(&container.state().history, id)?;
            println!("{}", item.text);
            Ok(())
        }
        HistoryCommand::Remove { id } => apply(container, Action::DeleteHistory(id)),
        HistoryCommand::Clear => apply(container, Action::ClearHistory),
    }
}

fn export<R: StateRepository>(container: &StateContainer<R>, out: Option<PathBuf>) -> CmdResult {
    let path = out.unwrap_or_else(|| PathBuf::from(export_file_name(Local::now().date_naive())));
    let json = container
        .export_backup()
        .map_err(|err| format!("cannot serialize state: {err}"))?;
    std::fs::write(&path, json)
        .map_err(|err| format!("cannot write `{}`: {err}", path.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn import<R: StateRepository>(container: &mut StateContainer<R>, file: PathBuf) -> CmdResult {
    let text = std::fs::read_to_string(&file)
        .map_err(|err| format!("cannot read `{}`: {err}", file.display()))?;
    container
        .import_backup(&text)
        .map_err(|err| err.to_string())?;
    println!("imported {}", file.display());
    Ok(())
}

fn find_history(history: &[HistoryItem], id: EntryId) -> Result<&HistoryItem, String> {
    history
        .iter()
        .find(|item| item.id == id)
        .ok_or_else(|| format!("history item not found: {id}"))
}

fn format_timestamp(epoch_ms: i64) -> String {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}
