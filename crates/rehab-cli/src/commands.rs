use std::collections::BTreeMap;
use std::path::Path;

use eyre::{eyre, Result, WrapErr};
use rehab_client::dashboard::LevelHistogram;
use rehab_client::spreadsheet::read_spreadsheet;
use rehab_client::BackendClient;
use rehab_core::models::patient::level_label;
use rehab_core::models::upload::CheckNewPatientsResponse;
use rehab_core::{add_disease, fields, set_disease, PatientRecord};
use rehab_instruments::activity::{classify, profile_by_name, INTAKE_CARD, QUICK_ASSESSMENT};
use rehab_instruments::calculator::{CalculatorInput, CalculatorParam};
use rehab_instruments::reducer::{recompute_all, EditSession};
use rehab_instruments::upload::{apply_manual_inputs, has_missing};
use tracing::{info, warn};

use crate::cli::{CalcArgs, Cli, Commands, ConfigAction, ImportArgs, RecordAction};
use crate::config::{self, RehabConfig, BACKEND_URL_ENV};
use crate::render;

pub async fn run(cli: Cli) -> Result<()> {
    let backend = cli.backend.as_deref();
    match cli.command {
        Commands::Config { action } => config_command(action, backend),
        Commands::Record {
            path,
            profile,
            action,
        } => record_command(&path, &profile, action),
        Commands::Patients => {
            let patients = client(backend)?.patients().await?;
            print!("{}", render::patients(&patients));
            println!();
            print!(
                "{}",
                render::histogram(&LevelHistogram::from_patients(&patients))
            );
            Ok(())
        }
        Commands::PredictAll => {
            let result = client(backend)?.predict_activity().await?;
            println!(
                "{} Обновлено записей: {}.",
                result.message, result.updated_count
            );
            for failure in &result.failed_predictions {
                warn!(%failure, "prediction failed");
            }
            Ok(())
        }
        Commands::Card { code } => {
            let card = client(backend)?.patient_card(code).await?;
            print!("{}", render::card(&card));
            Ok(())
        }
        Commands::Program { code } => {
            let program = client(backend)?.patient_program(code).await?;
            print!("{}", render::program(&program));
            Ok(())
        }
        Commands::Calc(args) => calc_command(&client(backend)?, args).await,
        Commands::Predict { code, save } => {
            let client = client(backend)?;
            let result = client.predict_activity_single(code).await?;
            println!("{}", result.activity_level);
            if save {
                client.save_fa_result(code, &result.activity_level).await?;
                println!("Результат успешно сохранён");
            }
            Ok(())
        }
        Commands::Submit { path } => {
            let record = recompute_all(&read_record(&path)?, &INTAKE_CARD);
            let response = client(backend)?.create_card(&record).await?;
            info!(path = %path.display(), "card submitted");
            println!("Карта успешно сохранена {}", response.message);
            Ok(())
        }
        Commands::SaveLfk { code, path } => {
            let record = read_record(&path)?;
            let levels = classify(&QUICK_ASSESSMENT, &record);
            let overall = levels.overall.unwrap_or(0);
            println!("Уровень ЛФК: {overall}");
            client(backend)?.save_lfk_result(code, overall).await?;
            println!("Результат ЛФК успешно сохранён");
            Ok(())
        }
        Commands::Import(args) => import_command(&client(backend)?, args).await,
    }
}

fn client(flag: Option<&str>) -> Result<BackendClient> {
    let env = std::env::var(BACKEND_URL_ENV).ok();
    let saved = config::load_config()?;
    let url = config::resolve_backend_url(flag, env.as_deref(), saved.as_ref());
    info!(backend = %url, "using backend");
    Ok(BackendClient::new(url))
}

fn config_command(action: ConfigAction, flag: Option<&str>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let saved = config::load_config()?;
            println!("path:     {}", config::config_path()?.display());
            match &saved {
                Some(c) => {
                    println!("saved:    {}", c.backend_url);
                    println!("created:  {}", c.created_at);
                }
                None => println!("saved:    (none)"),
            }
            let env = std::env::var(BACKEND_URL_ENV).ok();
            println!(
                "in use:   {}",
                config::resolve_backend_url(flag, env.as_deref(), saved.as_ref())
            );
        }
        ConfigAction::SetBackend { url } => {
            let next = match config::load_config()? {
                Some(existing) => RehabConfig {
                    backend_url: url,
                    ..existing
                },
                None => RehabConfig::new(url),
            };
            let path = config::save_config(&next)?;
            println!("saved to {}", path.display());
        }
        ConfigAction::Reset => config::delete_config()?,
    }
    Ok(())
}

/// Read a record file. A missing file is an empty record.
fn read_record(path: &Path) -> Result<PatientRecord> {
    if !path.exists() {
        return Ok(PatientRecord::new());
    }
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).wrap_err_with(|| format!("invalid record in {}", path.display()))
}

fn write_record(path: &Path, record: &PatientRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json).wrap_err_with(|| format!("failed to write {}", path.display()))
}

/// Copy the disease blobs of `next` into the session as edits.
fn edit_diseases(session: &mut EditSession, next: &PatientRecord) {
    for field in [fields::CHRONIC_DISEASES, fields::CHRONIC_DISEASE_STAGES] {
        if let Some(value) = next.get(field) {
            session.edit(field, value.clone());
        }
    }
}

fn record_command(path: &Path, profile: &str, action: RecordAction) -> Result<()> {
    let profile = profile_by_name(profile).ok_or_else(|| eyre!("unknown profile: {profile}"))?;
    let mut session = EditSession::from_record(&read_record(path)?, profile);

    match action {
        RecordAction::Show => {}
        RecordAction::Set { field, value } => {
            session.edit(&field, value);
        }
        RecordAction::AddDisease => {
            let next = add_disease(session.record())?;
            edit_diseases(&mut session, &next);
        }
        RecordAction::Disease { index, name, stage } => {
            let next = set_disease(session.record(), index, &name, &stage)?;
            edit_diseases(&mut session, &next);
        }
    }

    if session.revision() > 0 {
        write_record(path, session.record())?;
        info!(path = %path.display(), revision = session.revision(), "record saved");
    }
    print!("{}", render::record_report(session.record(), session.profile()));
    Ok(())
}

async fn calc_command(client: &BackendClient, args: CalcArgs) -> Result<()> {
    let mut input = match args.patient {
        Some(code) => CalculatorInput::from_seed(&client.calculator_seed(code).await?),
        None => CalculatorInput::default(),
    };
    let overrides = [
        (CalculatorParam::AgeFrailtyScore, args.age_score),
        (CalculatorParam::ActivityFrequency, args.frequency),
        (CalculatorParam::ActivityDuration, args.duration),
        (CalculatorParam::Bmi, args.bmi),
        (CalculatorParam::BarthelIndex, args.barthel),
        (CalculatorParam::Sppb, args.sppb),
        (CalculatorParam::GetUpAndGo, args.get_up_and_go),
        (CalculatorParam::FourMetreWalk, args.walk),
    ];
    for (param, value) in overrides {
        if let Some(value) = value {
            input.set(param, value);
        }
    }

    let prediction = client.predict_model(&input).await?;
    let label = level_label(prediction.predicted_class);
    println!("{label}");

    if args.save
        && let Some(code) = args.patient
    {
        client.save_fa_result(code, &label).await?;
        println!("Результат успешно сохранён");
    }
    Ok(())
}

async fn import_command(client: &BackendClient, args: ImportArgs) -> Result<()> {
    let file = read_spreadsheet(&args.file).await?;
    let response = client.check_new_patients(&file).await?;
    if let CheckNewPatientsResponse::NoNewPatients { message } = &response {
        println!(
            "{}",
            message.as_deref().unwrap_or("Новых пациентов не найдено")
        );
        return Ok(());
    }
    let mut rows = response.new_patients().to_vec();

    if let Some(path) = &args.values {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let inputs: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(&contents)?;
        for row in &mut rows {
            let Some(values) = inputs.get(&row.code) else {
                continue;
            };
            let fill = apply_manual_inputs(row, values);
            for column in &fill.rejected {
                warn!(code = %row.code, %column, "Неверное значение");
            }
            *row = fill.patient;
        }
    }

    if args.fill_synthetic {
        for row in &mut rows {
            if !row.is_complete() {
                *row = client.fill_synthetic(row).await?;
            }
        }
    }

    print!("{}", render::new_patients(&rows));

    if args.commit {
        if has_missing(&rows) {
            warn!("uploading rows that still have missing columns");
        }
        let response = client.upload_new_patients(&rows).await?;
        println!("Успешно! {}", response.message);
    }
    Ok(())
}
