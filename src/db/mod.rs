use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
    Client, Collection, IndexModel,
};
use std::time::Duration;

use crate::{
    config::Config,
    errors::AppResult,
    models::domain::{QuizDefinition, Submission},
};

/// Name of the per-examinee, per-quiz submission index. Unique when only one
/// submission per quiz is allowed.
pub const EXAMINEE_QUIZ_INDEX: &str = "examinee_quiz";

/// Handle on the quiz database and its two collections.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db: mongodb::Database,
    quizzes_collection: String,
    submissions_collection: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        client_options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.max_pool_size = Some(10);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let database = Self {
            db: client.database(&config.mongo_db_name),
            client,
            quizzes_collection: config.quizzes_collection.clone(),
            submissions_collection: config.submissions_collection.clone(),
        };
        database.health_check().await?;

        log::info!(
            "Connected to MongoDB database '{}' (quizzes: '{}', submissions: '{}')",
            config.mongo_db_name,
            database.quizzes_collection,
            database.submissions_collection
        );
        Ok(database)
    }

    pub fn quizzes(&self) -> Collection<QuizDefinition> {
        self.db.collection(&self.quizzes_collection)
    }

    pub fn submissions(&self) -> Collection<Submission> {
        self.db.collection(&self.submissions_collection)
    }

    /// Creates the indexes both repositories rely on. With
    /// `one_submission_per_quiz` the database itself refuses a second
    /// submission for the same examinee and quiz.
    pub async fn ensure_indexes(&self, one_submission_per_quiz: bool) -> AppResult<()> {
        self.quizzes().create_indexes(quiz_indexes()).await?;
        log::info!("Ensured indexes on '{}'", self.quizzes_collection);

        let submissions = self.submissions();
        // an existing index under the same name with other options would conflict
        drop_if_uniqueness_differs(&submissions, EXAMINEE_QUIZ_INDEX, one_submission_per_quiz)
            .await?;
        submissions
            .create_indexes(submission_indexes(one_submission_per_quiz))
            .await?;
        log::info!(
            "Ensured indexes on '{}' (one submission per quiz: {})",
            self.submissions_collection,
            one_submission_per_quiz
        );
        Ok(())
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

/// Drops `name` when its uniqueness differs from `unique`.
async fn drop_if_uniqueness_differs(
    collection: &Collection<Submission>,
    name: &str,
    unique: bool,
) -> AppResult<()> {
    let existing: Vec<IndexModel> = collection.list_indexes().await?.try_collect().await?;
    let stale = existing.iter().any(|index| {
        index.options.as_ref().is_some_and(|options| {
            options.name.as_deref() == Some(name) && options.unique.unwrap_or(false) != unique
        })
    });

    if stale {
        log::warn!("Rebuilding index '{}' with unique = {}", name, unique);
        collection.drop_index(name).await?;
    }
    Ok(())
}

fn quiz_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build(),
        IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder().name("created_at".to_string()).build())
            .build(),
    ]
}

fn submission_indexes(one_submission_per_quiz: bool) -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build(),
        IndexModel::builder()
            .keys(doc! { "examinee_id": 1, "quiz_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(one_submission_per_quiz)
                    .name(EXAMINEE_QUIZ_INDEX.to_string())
                    .build(),
            )
            .build(),
        IndexModel::builder()
            .keys(doc! { "examinee_id": 1, "submitted_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("examinee_history".to_string())
                    .build(),
            )
            .build(),
    ]
}
