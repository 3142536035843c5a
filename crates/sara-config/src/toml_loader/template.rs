//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Sara Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[backend]
# url = "http://127.0.0.1:8080"   # llama.cpp server or any OpenAI-compatible endpoint
# model = "llama-2-7b-chat"
# api_key = ""                    # or set SARA_API_KEY
# stream = true
# connect_timeout_secs = 10       # 1-120
# request_timeout_secs = 300      # 1-3600

[generation]
# context_window = 4096           # 512-131072
# max_tokens = 1024               # 1-context_window
# temperature = 0.5               # 0.0-2.0
# top_p = 0.75                    # 0.0-1.0

[persona]
name = "Sara"
# system_prompt = "..."           # replaces the built-in tutoring instruction

[memory]
# summary_token_limit = 2000      # history budget before older turns are summarized;
                                  # unset = 3/4 of what context_window leaves after
                                  # max_tokens and the system instruction

[export]
# default_file_name = "conversation.txt"

[logging]
# level = "WARNING"               # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
