use std::path::Path;

/// System prompt used when none is configured
pub fn default_system_prompt(workdir: &Path) -> String {
    format!(
        "You are a coding agent at {}.\n\
         \n\
         Loop: plan -> act with tools -> update todos -> report.\n\
         \n\
         Rules:\n\
         - Use TodoWrite to track multi-step tasks\n\
         - Mark tasks in_progress before starting, completed when done\n\
         - Keep exactly one task in_progress at a time\n\
         - Prefer tools over prose. Act, don't just explain.\n\
         - After finishing, summarize what changed.",
        workdir.display()
    )
}
