use crate::models::domain::Difficulty;

pub const BEGINNER_CLAUSE: &str = "Beginner level: write each prompt as a simple, direct instruction that asks the AI for a single step or a single result. Keep it to one or two sentences with no role-play and no extra conditions.";

pub const INTERMEDIATE_CLAUSE: &str = "Intermediate level: in each prompt, assign the AI a specific persona or role (for example \"You are an HR manager\") and describe the situational context it is working in, including who the output is for and why it is needed.";

pub const ADVANCED_CLAUSE: &str = "Advanced level: this is the most demanding variant. Each prompt must be long and structured, at least 10-15 lines, and must contain these distinct labeled sections: [Context], [Role], [Detailed Constraints], [Output Format], and [Example] with one fully worked example.";

pub const IMAGE_CLAUSE: &str = "An image is attached to this request. Ground every material in what the image shows and refer to its concrete details in the prompt content.";

pub const OUTPUT_CONTRACT: &str = "Return only a JSON array of objects. Each object must have exactly these four fields: \"title\" (a short name for the material), \"content\" (the prompt text a learner can copy and paste as-is), \"expected_answer\" (what a good AI answer to that prompt looks like), and \"difficulty\". Do not wrap the output in markdown code fences such as ```json, and do not add any text before or after the array.";

pub fn difficulty_clause(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Beginner => BEGINNER_CLAUSE,
        Difficulty::Intermediate => INTERMEDIATE_CLAUSE,
        Difficulty::Advanced => ADVANCED_CLAUSE,
    }
}
