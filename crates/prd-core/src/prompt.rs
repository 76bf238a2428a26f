use crate::inputs::ProjectInputs;

/// Build the instruction prompt sent to the text-generation service.
///
/// The closing instructions ("Summarize…", "Output only…") are what models
/// tend to echo back; `normalize::strip_prompt_echo` removes them again.
pub fn build_prompt(inputs: &ProjectInputs) -> String {
    format!(
        "Write a project requirements document in markdown for the project below.\n\
         \n\
         Project Name: {name}\n\
         Description: {description}\n\
         Features:\n\
         {features}\n\
         \n\
         Summarize the project goals, then describe the requirements of each feature.\n\
         Output only the markdown document, starting with a single '# ' heading.",
        name = inputs.name.trim(),
        description = inputs.description.trim(),
        features = inputs.feature_bullets(),
    )
}
