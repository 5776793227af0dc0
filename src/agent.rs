use crate::cli::Args;
use crate::config::prompt::{ self, PromptConfig };
use crate::llm::{ LlmConfig, LlmType };
use crate::llm::chat::{ ChatClient, CompletionRequest, new_client as new_chat_client };
use crate::locations::{ extract_locations, merge_locations, to_markers, LocationCatalog, MergePolicy };
use crate::models::chat::{ ChatMessage, ChatResponse, Role };
use crate::models::location::Location;

use log::{ info, error };
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// Which earlier turns are replayed to the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryPolicy {
    /// Only the user's own turns; assistant replies are never fed back.
    #[default]
    UserTurnsOnly,
    FullConversation,
}

impl HistoryPolicy {
    pub fn select(&self, messages: &[ChatMessage]) -> Vec<ChatMessage> {
        match self {
            HistoryPolicy::UserTurnsOnly =>
                messages
                    .iter()
                    .filter(|m| m.role == Role::User)
                    .cloned()
                    .collect(),
            HistoryPolicy::FullConversation => messages.to_vec(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Invalid messages array")]
    EmptyConversation,
    #[error("No user messages found")]
    NoUserMessages,
    #[error("Language model request failed: {0}")]
    Upstream(Box<dyn Error + Send + Sync>),
}

impl AgentError {
    /// True for errors caused by the caller's input rather than the model.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, AgentError::EmptyConversation | AgentError::NoUserMessages)
    }
}

/// Everything sent to the model for one turn, plus the catalog hits that
/// seeded it.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTurn {
    pub request: CompletionRequest,
    pub matched: Vec<Location>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub message: ChatMessage,
    pub locations: Vec<Location>,
}

impl AgentReply {
    pub fn into_response(self) -> ChatResponse {
        ChatResponse {
            locations: to_markers(&self.locations),
            message: self.message,
        }
    }
}

#[derive(Clone)]
pub struct TravelAgent {
    chat_client: Arc<dyn ChatClient>,
    catalog: LocationCatalog,
    prompt_config: Arc<PromptConfig>,
    history_policy: HistoryPolicy,
    merge_policy: MergePolicy,
}

impl TravelAgent {
    pub fn new(
        chat_client: Arc<dyn ChatClient>,
        catalog: LocationCatalog,
        prompt_config: Arc<PromptConfig>
    ) -> Self {
        Self {
            chat_client,
            catalog,
            prompt_config,
            history_policy: HistoryPolicy::default(),
            merge_policy: MergePolicy::default(),
        }
    }

    pub fn with_history_policy(mut self, history_policy: HistoryPolicy) -> Self {
        self.history_policy = history_policy;
        self
    }

    pub fn with_merge_policy(mut self, merge_policy: MergePolicy) -> Self {
        self.merge_policy = merge_policy;
        self
    }

    fn initialize_chat_client(
        args: &Args
    ) -> Result<Arc<dyn ChatClient>, Box<dyn Error + Send + Sync>> {
        let chat_llm_type: LlmType = args.chat_llm_type.parse()?;
        let chat_api_key = if !args.chat_api_key.is_empty() {
            Some(args.chat_api_key.clone())
        } else {
            None
        };
        let chat_config = LlmConfig {
            llm_type: chat_llm_type,
            base_url: args.chat_base_url.clone(),
            api_key: chat_api_key,
            completion_model: args.chat_model.clone(),
            max_output_tokens: args.max_output_tokens,
            temperature: args.temperature,
        };
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Type={}, Model={}, BaseURL={:?}, MaxTokens={}, Temperature={}",
            args.chat_llm_type,
            chat_client.get_model(),
            chat_config.base_url.as_deref().unwrap_or("adapter default"),
            chat_config.max_output_tokens,
            chat_config.temperature
        );
        Ok(chat_client)
    }

    pub fn from_args(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let chat_client = Self::initialize_chat_client(args)?;
        let prompt_config = prompt::load_prompts_or_default(args.prompts_path.as_deref())?;
        let merge_policy: MergePolicy = args.merge_prefer.parse()?;
        let history_policy = if args.replay_assistant_turns {
            HistoryPolicy::FullConversation
        } else {
            HistoryPolicy::UserTurnsOnly
        };
        let catalog = LocationCatalog::builtin();
        info!("Location catalog loaded with {} entries", catalog.len());

        Ok(
            Self::new(chat_client, catalog, prompt_config)
                .with_history_policy(history_policy)
                .with_merge_policy(merge_policy)
        )
    }

    /// Validates the conversation and builds the model request without
    /// calling the model.
    pub fn prepare_turn(&self, messages: &[ChatMessage]) -> Result<PreparedTurn, AgentError> {
        let latest = messages.last().ok_or(AgentError::EmptyConversation)?;
        if !messages.iter().any(|m| m.role == Role::User) {
            return Err(AgentError::NoUserMessages);
        }

        let history = self.history_policy.select(messages);
        let matched = self.catalog.search(&latest.content);
        let prompt = prompt::build_context_prompt(&self.prompt_config, &latest.content, &matched);

        Ok(PreparedTurn {
            request: CompletionRequest { history, prompt },
            matched,
        })
    }

    pub async fn process_messages(
        &self,
        messages: &[ChatMessage]
    ) -> Result<AgentReply, AgentError> {
        let PreparedTurn { request, matched } = self.prepare_turn(messages)?;
        info!(
            "Processing chat turn: {} messages, {} replayed, {} catalog matches",
            messages.len(),
            request.history.len(),
            matched.len()
        );

        let completion = self.chat_client.complete(&request).await.map_err(|e| {
            error!("Chat completion failed: {}", e);
            AgentError::Upstream(e)
        })?;
        let text = completion.response;

        let extracted = extract_locations(&text);
        info!("Extracted {} locations from reply", extracted.len());
        let locations = merge_locations(extracted, matched, self.merge_policy);

        Ok(AgentReply {
            message: ChatMessage::assistant(text),
            locations,
        })
    }
}
