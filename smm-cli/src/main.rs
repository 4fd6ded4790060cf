mod fallback;
mod logging;
mod session;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use smm_client::models::{
    AiConfigUpdate, AnalyzeVideoRequest, ContentRequest, Credentials, DefaultProvider,
    HashtagRequest, InsightsRequest, NewAiConfig, NewApiKey, NewCharacter, NewFavorite,
    NewUserMetric, OptimizeRequest, PasswordChange, PostingTimeRequest, Registration,
    TrendQuery, TrendingVideosRequest, UserId, VariationsRequest,
};
use smm_client::{
    ApiError, ApiErrorKind, ApiResult, CancelToken, ClientConfig, QueryParams, ReqwestTransport,
    SmmClient, UploadForm,
};
use tracing::warn;

use session::Session;

const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Parser)]
#[command(name = "smm-cli", version, about = "CLI клиент для API social-media-manager")]
struct Cli {
    /// Адрес сервера (по умолчанию SMM_API_BASE_URL или http://localhost:5000).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Срок на один запрос в секундах.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Пользователь для операций, которым нужен user_id.
    #[arg(long, global = true, default_value_t = 1)]
    user_id: UserId,

    /// Не показывать демонстрационные данные, если список не загрузился.
    #[arg(long, global = true)]
    no_fallback: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация, вход и ключи внешних сервисов.
    #[command(subcommand)]
    Auth(AuthCommand),
    /// Тренды и рекомендации.
    #[command(subcommand)]
    Trends(TrendsCommand),
    /// Генерация и анализ контента.
    #[command(subcommand)]
    Content(ContentCommand),
    /// Загрузка аудио и изображений на анализ.
    #[command(subcommand)]
    Upload(UploadCommand),
    /// Персонажи.
    #[command(subcommand)]
    Characters(CharactersCommand),
    /// Анализ видео.
    #[command(subcommand)]
    Video(VideoCommand),
    /// Аналитика и визуализации.
    #[command(subcommand)]
    Analytics(AnalyticsCommand),
    /// Конфигурации AI-провайдеров.
    #[command(subcommand)]
    AiConfigs(AiConfigsCommand),
    /// Доступные AI-провайдеры.
    #[command(subcommand)]
    Providers(ProvidersCommand),
    /// Избранный контент.
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Проверка доступности сервера.
    Health,
}

#[derive(Debug, Subcommand)]
enum AuthCommand {
    /// Регистрация пользователя; cookie сессии сохраняются в .smm_session.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Вход; cookie сессии сохраняются в .smm_session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Выход и удаление .smm_session.
    Logout,
    /// Состояние сессии.
    Status,
    /// Профиль текущего пользователя.
    Profile,
    /// Смена пароля.
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// Сохранённые ключи внешних сервисов.
    ApiKeys,
    /// Добавить ключ внешнего сервиса.
    AddApiKey {
        #[arg(long)]
        service: String,
        #[arg(long)]
        key: String,
    },
    /// Удалить ключ.
    RemoveApiKey {
        #[arg(long)]
        id: i64,
    },
    /// Провайдер по умолчанию.
    DefaultProvider {
        #[arg(long)]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
enum TrendsCommand {
    /// Список трендов с фильтрами.
    List {
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        /// Дополнительный фильтр `key=value`, можно повторять.
        #[arg(long = "filter", value_parser = parse_filter)]
        filters: Vec<(String, String)>,
    },
    /// Лучшие тренды за сутки.
    Top {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Обновить тренды на сервере.
    Refresh,
    /// Трендовые хэштеги.
    Hashtags {
        #[arg(long)]
        platform: Option<String>,
    },
    /// Топ трендов по платформам.
    Platforms,
    /// Поиск по ключевой фразе.
    Search { query: String },
    /// Рекомендации контента.
    Recommendations {
        /// Построить новые рекомендации вместо чтения сохранённых.
        #[arg(long)]
        generate: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ContentCommand {
    /// Пост под тренд от имени персонажа.
    Generate {
        #[arg(long)]
        trend_id: i64,
        #[arg(long)]
        character_id: i64,
        #[arg(long, default_value = "post")]
        content_type: String,
        #[arg(long)]
        platform: String,
        #[arg(long)]
        context: Option<String>,
    },
    /// Вариации текста.
    Variations {
        text: String,
        #[arg(long)]
        count: Option<u32>,
    },
    /// Хэштеги к тексту.
    Hashtags {
        text: String,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        count: Option<u32>,
    },
    /// Оптимизация текста под платформу.
    Optimize {
        text: String,
        #[arg(long)]
        platform: Option<String>,
    },
    /// Инсайты по тексту.
    Insights { text: String },
    /// Шаблоны контента.
    Templates,
}

#[derive(Debug, Subcommand)]
enum UploadCommand {
    /// Распознавание речи в аудиофайле.
    Transcribe {
        file: PathBuf,
        #[arg(long)]
        language: Option<String>,
    },
    /// Описание изображения.
    Image {
        file: PathBuf,
        #[arg(long)]
        prompt: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum CharactersCommand {
    /// Персонажи пользователя.
    List,
    /// Персонаж по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создать персонажа.
    Create(CharacterArgs),
    /// Создать персонажа из шаблона с заданным номером (см. `templates`).
    FromTemplate {
        #[arg(long)]
        index: usize,
    },
    /// Удалить персонажа.
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Готовые шаблоны.
    Templates,
}

#[derive(Debug, Args)]
struct CharacterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    tone: String,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    audience: Option<String>,
    #[arg(long)]
    style: Option<String>,
    /// Платформы через запятую.
    #[arg(long, value_delimiter = ',')]
    platforms: Vec<String>,
    /// Ключевые слова через запятую.
    #[arg(long, value_delimiter = ',')]
    keywords: Vec<String>,
}

#[derive(Debug, Subcommand)]
enum VideoCommand {
    /// Поставить ролик на анализ.
    Analyze {
        url: String,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        post_id: Option<i64>,
    },
    /// Анализ ролика поста.
    Get {
        #[arg(long)]
        post_id: i64,
    },
    /// Все анализы пользователя.
    List,
    /// Пакетный анализ трендовых роликов по ссылкам.
    Trending {
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Series {
    Platform,
    Category,
    Sentiment,
    EngagementOverTime,
}

#[derive(Debug, Subcommand)]
enum AnalyticsCommand {
    /// Сводка.
    Summary {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Лучшее время публикации по истории.
    PostingTimes {
        #[arg(long)]
        platform: Option<String>,
    },
    /// Метрики пользователя.
    User {
        #[arg(long)]
        summary: bool,
    },
    /// Данные для графиков.
    Chart {
        #[arg(value_enum)]
        series: Series,
        #[arg(long)]
        platform: Option<String>,
        #[arg(long)]
        days: Option<u32>,
    },
    /// Вовлечённость по платформам за период.
    Engagement {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Записать метрику.
    Record {
        #[arg(long)]
        metric: String,
        /// Значение в JSON (`42`, `"text"`, `{"a": 1}`).
        #[arg(long)]
        value: String,
    },
    /// Рекомендация времени публикации.
    SuggestTime {
        #[arg(long)]
        platform: String,
        #[arg(long)]
        content_type: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum AiConfigsCommand {
    List,
    Create {
        #[arg(long)]
        provider: String,
        #[arg(long)]
        api_key: String,
        #[arg(long)]
        text_model: Option<String>,
        #[arg(long)]
        speech_model: Option<String>,
        #[arg(long)]
        vision_model: Option<String>,
        #[arg(long)]
        default: bool,
    },
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        text_model: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Проверить подключение.
    Test {
        #[arg(long)]
        id: i64,
    },
    /// Сделать конфигурацией по умолчанию.
    SetDefault {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum ProvidersCommand {
    List,
    /// Модели провайдера.
    Models { name: String },
}

#[derive(Debug, Subcommand)]
enum FavoritesCommand {
    List,
    Add {
        #[arg(long)]
        content_id: i64,
    },
    Remove {
        #[arg(long)]
        id: i64,
    },
    /// Проверить, в избранном ли контент.
    Check {
        #[arg(long)]
        content_id: i64,
    },
}

struct App {
    client: SmmClient,
    session: Session,
    user_id: UserId,
    fallback: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());
    logging::init_logging(&log_level)?;

    let config = resolve_config(cli.server, cli.timeout)?;
    let session = Session::load(&config.base_url)?;
    let transport =
        ReqwestTransport::with_cookie_jar(&config, session.jar()).map_err(map_client_error)?;

    let cancel = CancelToken::new();
    spawn_ctrl_c_handler(cancel.clone());
    let client = SmmClient::with_transport(config, Arc::new(transport)).with_cancel(cancel);

    let app = App {
        client,
        session,
        user_id: cli.user_id,
        fallback: !cli.no_fallback,
    };

    match cli.command {
        Command::Auth(command) => run_auth(&app, command).await,
        Command::Trends(command) => run_trends(&app, command).await,
        Command::Content(command) => run_content(&app, command).await,
        Command::Upload(command) => run_upload(&app, command).await,
        Command::Characters(command) => run_characters(&app, command).await,
        Command::Video(command) => run_video(&app, command).await,
        Command::Analytics(command) => run_analytics(&app, command).await,
        Command::AiConfigs(command) => run_ai_configs(&app, command).await,
        Command::Providers(command) => run_providers(&app, command).await,
        Command::Favorites(command) => run_favorites(&app, command).await,
        Command::Health => {
            let health = app.client.health().await.map_err(map_client_error)?;
            print_json("Сервер доступен", &health)
        }
    }
}

fn spawn_ctrl_c_handler(cancel: CancelToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });
}

/// Флаги CLI перекрывают переменные окружения.
fn resolve_config(server: Option<String>, timeout_secs: Option<u64>) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("некорректная конфигурация окружения")?;

    if let Some(server) = server {
        config.base_url = normalize_server(server);
    }
    match timeout_secs {
        Some(0) => return Err(anyhow!("--timeout должен быть больше нуля")),
        Some(secs) => config.request_timeout = Some(Duration::from_secs(secs)),
        None => {}
    }

    Ok(config)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("ожидается key=value, получено `{raw}`")),
    }
}

async fn run_auth(app: &App, command: AuthCommand) -> Result<()> {
    let client = &app.client;
    match command {
        AuthCommand::Register {
            username,
            email,
            password,
        } => {
            let response = client
                .register(&Registration {
                    username,
                    email,
                    password: password.into(),
                })
                .await
                .map_err(map_client_error)?;
            persist_session(&app.session)?;
            print_json("Регистрация успешна", &response)
        }
        AuthCommand::Login { username, password } => {
            let response = client
                .login(&Credentials {
                    username,
                    password: password.into(),
                })
                .await
                .map_err(map_client_error)?;
            persist_session(&app.session)?;
            print_json("Вход выполнен", &response)
        }
        AuthCommand::Logout => {
            client.logout().await.map_err(map_client_error)?;
            app.session
                .clear()
                .context("не удалось удалить .smm_session")?;
            println!("Выход выполнен");
            Ok(())
        }
        AuthCommand::Status => {
            let status = client.auth_status().await.map_err(map_client_error)?;
            print_json("Сессия", &status)
        }
        AuthCommand::Profile => {
            let profile = client.profile().await.map_err(map_client_error)?;
            print_json("Профиль", &profile)
        }
        AuthCommand::ChangePassword { current, new } => {
            client
                .change_password(&PasswordChange {
                    current_password: current.into(),
                    new_password: new.into(),
                })
                .await
                .map_err(map_client_error)?;
            println!("Пароль изменён");
            Ok(())
        }
        AuthCommand::ApiKeys => {
            let keys = client.api_keys().await.map_err(map_client_error)?;
            print_json(&format!("Ключей: {}", keys.len()), &keys)
        }
        AuthCommand::AddApiKey { service, key } => {
            let key = client
                .add_api_key(&NewApiKey {
                    service,
                    key: key.into(),
                })
                .await
                .map_err(map_client_error)?;
            print_json("Ключ сохранён", &key)
        }
        AuthCommand::RemoveApiKey { id } => {
            client.remove_api_key(id).await.map_err(map_client_error)?;
            println!("Ключ удалён: id={id}");
            Ok(())
        }
        AuthCommand::DefaultProvider { name } => {
            client
                .set_default_provider(&DefaultProvider {
                    provider_name: name.clone(),
                })
                .await
                .map_err(map_client_error)?;
            println!("Провайдер по умолчанию: {name}");
            Ok(())
        }
    }
}

async fn run_trends(app: &App, command: TrendsCommand) -> Result<()> {
    let client = &app.client;
    match command {
        TrendsCommand::List {
            platform,
            category,
            limit,
            filters,
        } => {
            let query = TrendQuery {
                platform,
                category,
                limit,
                extra: filters.into_iter().collect(),
            };
            let trends = or_fallback(
                client.trends(&query).await,
                app.fallback,
                "тренды",
                fallback::trends,
            )?;
            print_json(&format!("Трендов: {}", trends.len()), &trends)
        }
        TrendsCommand::Top { limit } => {
            let trends = or_fallback(
                client.top_trends(limit).await,
                app.fallback,
                "лучшие тренды",
                fallback::trends,
            )?;
            print_json(&format!("Трендов: {}", trends.len()), &trends)
        }
        TrendsCommand::Refresh => {
            let trends = client.refresh_trends().await.map_err(map_client_error)?;
            print_json(&format!("Тренды обновлены: {}", trends.len()), &trends)
        }
        TrendsCommand::Hashtags { platform } => {
            let filters = QueryParams::new().with_opt("platform", platform);
            let hashtags = client
                .trending_hashtags(filters)
                .await
                .map_err(map_client_error)?;
            print_json("Трендовые хэштеги", &hashtags)
        }
        TrendsCommand::Platforms => {
            let groups = client.trends_by_platform().await.map_err(map_client_error)?;
            print_json("Тренды по платформам", &groups)
        }
        TrendsCommand::Search { query } => {
            let trends = client.search_trends(&query).await.map_err(map_client_error)?;
            print_json(&format!("Найдено: {}", trends.len()), &trends)
        }
        TrendsCommand::Recommendations { generate } => {
            let recommendations = if generate {
                client.generate_recommendations(app.user_id).await
            } else {
                client.recommendations(app.user_id).await
            }
            .map_err(map_client_error)?;
            print_json(
                &format!("Рекомендаций: {}", recommendations.len()),
                &recommendations,
            )
        }
    }
}

async fn run_content(app: &App, command: ContentCommand) -> Result<()> {
    let client = &app.client;
    match command {
        ContentCommand::Generate {
            trend_id,
            character_id,
            content_type,
            platform,
            context,
        } => {
            let generated = client
                .generate_content(&ContentRequest {
                    trend_id,
                    character_id,
                    content_type,
                    platform,
                    additional_context: context,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Контент", &generated)
        }
        ContentCommand::Variations { text, count } => {
            let variations = client
                .generate_variations(&VariationsRequest {
                    user_id: app.user_id,
                    original_content: text,
                    character_profile: None,
                    count,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Вариации", &variations)
        }
        ContentCommand::Hashtags {
            text,
            platform,
            count,
        } => {
            let hashtags = client
                .generate_hashtags(&HashtagRequest {
                    content: text,
                    platform,
                    count,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Хэштеги", &hashtags)
        }
        ContentCommand::Optimize { text, platform } => {
            let optimized = client
                .optimize_content(&OptimizeRequest {
                    content: text,
                    platform,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Оптимизированный текст", &optimized)
        }
        ContentCommand::Insights { text } => {
            let insights = client
                .analyze_content(&InsightsRequest {
                    user_id: app.user_id,
                    content_text: text,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Инсайты", &insights)
        }
        ContentCommand::Templates => {
            let templates = client.content_templates().await.map_err(map_client_error)?;
            print_json(&format!("Шаблонов: {}", templates.len()), &templates)
        }
    }
}

async fn run_upload(app: &App, command: UploadCommand) -> Result<()> {
    let client = &app.client;
    match command {
        UploadCommand::Transcribe { file, language } => {
            let mut form = read_upload("audio", &file).await?;
            if let Some(language) = language {
                form = form.text("language", language);
            }
            let transcript = client
                .transcribe_audio(form)
                .await
                .map_err(map_client_error)?;
            print_json("Расшифровка", &transcript)
        }
        UploadCommand::Image { file, prompt } => {
            let mut form = read_upload("image", &file).await?;
            if let Some(prompt) = prompt {
                form = form.text("prompt", prompt);
            }
            let description = client.analyze_image(form).await.map_err(map_client_error)?;
            print_json("Описание изображения", &description)
        }
    }
}

async fn read_upload(field: &str, path: &Path) -> Result<UploadForm> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("не удалось прочитать {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();

    Ok(UploadForm::new().file(field, file_name, guess_mime(path), bytes))
}

fn guess_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "ogg" => "audio/ogg",
        "webm" => "audio/webm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}

async fn run_characters(app: &App, command: CharactersCommand) -> Result<()> {
    let client = &app.client;
    match command {
        CharactersCommand::List => {
            let characters = or_fallback(
                client.characters(app.user_id).await,
                app.fallback,
                "персонажей",
                fallback::characters,
            )?;
            print_json(&format!("Персонажей: {}", characters.len()), &characters)
        }
        CharactersCommand::Get { id } => {
            let character = client.character(id).await.map_err(map_client_error)?;
            print_json("Персонаж", &character)
        }
        CharactersCommand::Create(args) => {
            let character = client
                .create_character(&NewCharacter {
                    user_id: app.user_id,
                    name: args.name,
                    tone: args.tone,
                    description: args.description,
                    target_audience: args.audience,
                    content_style: args.style,
                    preferred_platforms: args.platforms,
                    keywords: args.keywords,
                    ..NewCharacter::default()
                })
                .await
                .map_err(map_client_error)?;
            print_json("Персонаж создан", &character)
        }
        CharactersCommand::FromTemplate { index } => {
            let templates = client.character_templates().await.map_err(map_client_error)?;
            let template = templates
                .get(index)
                .ok_or_else(|| anyhow!("шаблона с номером {index} нет, доступно: {}", templates.len()))?;
            let character = client
                .create_character(&template.to_new_character(app.user_id))
                .await
                .map_err(map_client_error)?;
            print_json("Персонаж создан из шаблона", &character)
        }
        CharactersCommand::Delete { id } => {
            client.delete_character(id).await.map_err(map_client_error)?;
            println!("Персонаж удалён: id={id}");
            Ok(())
        }
        CharactersCommand::Templates => {
            let templates = client.character_templates().await.map_err(map_client_error)?;
            for (index, template) in templates.iter().enumerate() {
                println!("[{index}] {} ({})", template.name, template.tone);
            }
            Ok(())
        }
    }
}

async fn run_video(app: &App, command: VideoCommand) -> Result<()> {
    let client = &app.client;
    match command {
        VideoCommand::Analyze {
            url,
            platform,
            post_id,
        } => {
            let analysis = client
                .analyze_video(&AnalyzeVideoRequest {
                    user_id: app.user_id,
                    video_url: url,
                    platform,
                    post_id,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Анализ видео", &analysis)
        }
        VideoCommand::Get { post_id } => {
            let analysis = client
                .video_analysis(post_id)
                .await
                .map_err(map_client_error)?;
            print_json("Анализ видео", &analysis)
        }
        VideoCommand::List => {
            let analyses = or_fallback(
                client.video_analyses(app.user_id).await,
                app.fallback,
                "анализы видео",
                fallback::video_analyses,
            )?;
            print_json(&format!("Анализов: {}", analyses.len()), &analyses)
        }
        VideoCommand::Trending { urls } => {
            let trending_items = urls
                .into_iter()
                .map(|url| json!({ "video_url": url }))
                .collect();
            let result = client
                .analyze_trending_videos(&TrendingVideosRequest {
                    user_id: app.user_id,
                    trending_items,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Анализ трендовых роликов", &result)
        }
    }
}

async fn run_analytics(app: &App, command: AnalyticsCommand) -> Result<()> {
    let client = &app.client;
    match command {
        AnalyticsCommand::Summary { days } => {
            let summary = client
                .analytics_summary(QueryParams::new().with_opt("days", days))
                .await
                .map_err(map_client_error)?;
            print_json("Сводка", &summary)
        }
        AnalyticsCommand::PostingTimes { platform } => {
            let times = client
                .optimal_posting_times(QueryParams::new().with_opt("platform", platform))
                .await
                .map_err(map_client_error)?;
            print_json("Время публикации", &times)
        }
        AnalyticsCommand::User { summary } => {
            if summary {
                let summary = client
                    .user_analytics_summary()
                    .await
                    .map_err(map_client_error)?;
                print_json("Сводка метрик", &summary)
            } else {
                let metrics = client.user_analytics().await.map_err(map_client_error)?;
                print_json(&format!("Метрик: {}", metrics.len()), &metrics)
            }
        }
        AnalyticsCommand::Chart {
            series,
            platform,
            days,
        } => {
            let filters = QueryParams::new()
                .with_opt("platform", platform)
                .with_opt("days", days);
            let data = match series {
                Series::Platform => client.platform_distribution(filters).await,
                Series::Category => client.category_distribution(filters).await,
                Series::Sentiment => client.sentiment_distribution(filters).await,
                Series::EngagementOverTime => client.engagement_over_time(filters).await,
            }
            .map_err(map_client_error)?;
            print_json("Данные графика", &data)
        }
        AnalyticsCommand::Engagement { days } => {
            let analytics = client
                .engagement_analytics(QueryParams::new().with("days", days))
                .await
                .map_err(map_client_error)?;
            print_json(
                &format!("Вовлечённость за {} дн.", analytics.period_days),
                &analytics,
            )
        }
        AnalyticsCommand::Record { metric, value } => {
            let value = serde_json::from_str(&value)
                .with_context(|| format!("значение метрики не является JSON: {value}"))?;
            let response = client
                .record_user_metric(&NewUserMetric {
                    user_id: app.user_id,
                    metric_name: metric,
                    value,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Метрика записана", &response)
        }
        AnalyticsCommand::SuggestTime {
            platform,
            content_type,
        } => {
            let suggestion = client
                .suggest_posting_time(&PostingTimeRequest {
                    user_id: app.user_id,
                    platform,
                    content_type,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Рекомендуемое время", &suggestion)
        }
    }
}

async fn run_ai_configs(app: &App, command: AiConfigsCommand) -> Result<()> {
    let client = &app.client;
    match command {
        AiConfigsCommand::List => {
            let configs = client
                .ai_configs(Some(app.user_id))
                .await
                .map_err(map_client_error)?;
            print_json(&format!("Конфигураций: {}", configs.len()), &configs)
        }
        AiConfigsCommand::Create {
            provider,
            api_key,
            text_model,
            speech_model,
            vision_model,
            default,
        } => {
            let response = client
                .create_ai_config(&NewAiConfig {
                    user_id: app.user_id,
                    provider_name: provider,
                    api_key: api_key.into(),
                    default_model_text: text_model,
                    default_model_speech_to_text: speech_model,
                    default_model_vision_to_text: vision_model,
                    is_default: default,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Конфигурация создана", &response)
        }
        AiConfigsCommand::Update {
            id,
            api_key,
            text_model,
        } => {
            let response = client
                .update_ai_config(
                    id,
                    &AiConfigUpdate {
                        api_key: api_key.map(Into::into),
                        default_model_text: text_model,
                        ..AiConfigUpdate::default()
                    },
                )
                .await
                .map_err(map_client_error)?;
            print_json("Конфигурация обновлена", &response)
        }
        AiConfigsCommand::Delete { id } => {
            client.delete_ai_config(id).await.map_err(map_client_error)?;
            println!("Конфигурация удалена: id={id}");
            Ok(())
        }
        AiConfigsCommand::Test { id } => {
            let result = client.test_ai_config(id).await.map_err(map_client_error)?;
            print_json("Результат проверки", &result)
        }
        AiConfigsCommand::SetDefault { id } => {
            client
                .set_default_ai_config(id)
                .await
                .map_err(map_client_error)?;
            println!("Конфигурация по умолчанию: id={id}");
            Ok(())
        }
    }
}

async fn run_providers(app: &App, command: ProvidersCommand) -> Result<()> {
    match command {
        ProvidersCommand::List => {
            let providers = app.client.providers().await.map_err(map_client_error)?;
            for provider in &providers {
                println!("- {} ({})", provider.name, provider.models.join(", "));
            }
            Ok(())
        }
        ProvidersCommand::Models { name } => {
            let models = app
                .client
                .provider_models(&name)
                .await
                .map_err(map_client_error)?;
            if models.is_empty() {
                println!("У провайдера {name} нет моделей");
            }
            for model in models {
                println!("- {model}");
            }
            Ok(())
        }
    }
}

async fn run_favorites(app: &App, command: FavoritesCommand) -> Result<()> {
    let client = &app.client;
    match command {
        FavoritesCommand::List => {
            let favorites = client
                .favorites(Some(app.user_id))
                .await
                .map_err(map_client_error)?;
            print_json(&format!("В избранном: {}", favorites.len()), &favorites)
        }
        FavoritesCommand::Add { content_id } => {
            let response = client
                .add_favorite(&NewFavorite {
                    user_id: app.user_id,
                    content_id,
                })
                .await
                .map_err(map_client_error)?;
            print_json("Добавлено в избранное", &response)
        }
        FavoritesCommand::Remove { id } => {
            client.remove_favorite(id).await.map_err(map_client_error)?;
            println!("Удалено из избранного: id={id}");
            Ok(())
        }
        FavoritesCommand::Check { content_id } => {
            let status = client
                .is_favorite(content_id)
                .await
                .map_err(map_client_error)?;
            if status.is_favorite {
                println!("Контент {content_id} в избранном");
            } else {
                println!("Контента {content_id} нет в избранном");
            }
            Ok(())
        }
    }
}

fn persist_session(session: &Session) -> Result<()> {
    let saved = session
        .persist()
        .context("не удалось сохранить .smm_session")?;
    if !saved {
        warn!("server did not set a session cookie");
    }
    Ok(())
}

/// Подставляет демонстрационные данные, если список не загрузился.
///
/// Отмена пользователем остаётся ошибкой.
fn or_fallback<T>(
    result: ApiResult<Vec<T>>,
    enabled: bool,
    what: &str,
    demo: fn() -> serde_json::Result<Vec<T>>,
) -> Result<Vec<T>> {
    match result {
        Ok(items) => Ok(items),
        Err(err) if enabled && err.kind() != ApiErrorKind::Cancelled => {
            warn!(kind = %err.kind(), "listing failed, showing demo data: {err}");
            eprintln!("Не удалось загрузить {what} ({err}); показаны демонстрационные данные");
            demo().context("демонстрационные данные повреждены")
        }
        Err(err) => Err(map_client_error(err)),
    }
}

fn print_json<T: Serialize + ?Sized>(title: &str, value: &T) -> Result<()> {
    println!("{title}");
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn map_client_error(err: ApiError) -> anyhow::Error {
    let message = match &err {
        ApiError::Status { status: 401, .. } => {
            "требуется авторизация: выполните `smm-cli auth login ...` или `smm-cli auth register ...`"
                .to_string()
        }
        ApiError::Status {
            status: 404,
            message,
        } => format!("ресурс не найден: {message}"),
        ApiError::Status { status, message } => format!("ошибка сервера ({status}): {message}"),
        ApiError::Transport(message) => format!("сервер недоступен: {message}"),
        ApiError::Decode(_) => format!("неожиданный ответ сервера: {err}"),
        ApiError::Timeout(_) => format!("превышено время ожидания: {err}"),
        ApiError::Cancelled => "запрос отменён".to_string(),
        ApiError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
    };
    anyhow!(message)
}
