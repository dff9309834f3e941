//! Prompt construction
//!
//! Both builders are pure functions of their arguments. The wording of the
//! simulation instructions is what lets the model's reply be shown verbatim
//! as terminal output, so changes here change the response shape.

/// Reply the model is told to give when a run prints nothing
pub const NO_OUTPUT_SENTINEL: &str = "Code executed successfully (no output)";

/// Build the instruction asking the model to emulate a run of `code`.
///
/// `inputs` are listed in order and fed to the program as if typed by a user.
/// The input section is omitted entirely when `inputs` is empty.
///
/// Each input is written verbatim after its number. An input containing a
/// newline therefore spills onto the following line of the list, and the
/// model may read it as more than one value; callers wanting one value per
/// read should split multi-line text into separate inputs first.
pub fn simulation_prompt(code: &str, language_key: &str, inputs: &[String]) -> String {
    let language = language_key.to_uppercase();
    let fence = fence_for(code);

    let mut prompt = format!(
        "You are a code execution simulator. Execute the following {language} code and provide \
         the output exactly as it would appear when run.\n\n\
         Language: {language}\n\
         Code:\n\
         {fence}{language_key}\n{code}\n{fence}\n\n"
    );

    if !inputs.is_empty() {
        prompt.push_str("User inputs (in order):\n");
        for (index, input) in inputs.iter().enumerate() {
            prompt.push_str(&format!("{}. {input}\n", index + 1));
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "Instructions:\n\
         1. Simulate the execution of this code. Do not explain it.\n\
         2. Return ONLY what would be visible in the terminal, including any input prompts \
         and the echoed user input exactly as they would appear in an interactive session.\n\
         3. If there are errors, return the error or exception message exactly as it would \
         appear.\n\
         4. Do not include explanations or commentary, just the raw output.\n",
    );
    prompt.push_str(&format!(
        "5. If the code runs successfully but produces no output, return \"{NO_OUTPUT_SENTINEL}\".\n"
    ));
    if !inputs.is_empty() {
        prompt.push_str(
            "6. Whenever the program reads input, consume the user inputs above in sequence, \
             one per read, as if a user typed them.\n",
        );
    }
    prompt.push_str("\nOutput:\n");
    prompt
}

/// Build the instruction asking the model to revise `code` per `instruction`
pub fn suggestion_prompt(code: &str, language_key: &str, instruction: &str) -> String {
    let language = language_key.to_uppercase();
    let fence = fence_for(code);

    format!(
        "You are a code assistant. Help improve the following {language} code based on the \
         user's request.\n\n\
         Current code:\n\
         {fence}{language_key}\n{code}\n{fence}\n\n\
         User request: {instruction}\n\n\
         Please provide an improved version of the code. Return only the code without \
         explanations or markdown formatting.\n"
    )
}

/// A backtick fence longer than any backtick run inside `code`
fn fence_for(code: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for ch in code.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}
