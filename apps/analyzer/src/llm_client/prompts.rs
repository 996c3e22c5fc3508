// Fixed prompt text sent to the model. The analysis module interpolates the
// extracted document text at `{resume_text}`.

/// Instruction template for resume analysis. The model is told to emit a bare
/// JSON object; the service passes whatever comes back through untouched.
pub const RESUME_ANALYSIS_PROMPT: &str = "You are an expert Resume Analyzer AI. \
Your task is to meticulously analyze the provided resume text and return ONLY a valid JSON object, \
adhering strictly to the specified format and constraints. \
Do not include any introductory text, explanations, or markdown formatting around the JSON output.\
**Analysis Context & Criteria:: \
{\"score\": 0-100, \"summary\": \"5 bullet points max\", \"top_skills\": [\"skill1\", \"skill2\", \"skill3\"], \
\"improvements\": [\"actionable_item1\", \"actionable_item2\", \"actionable_item3\", \"actionable_item4\", \"actionable_item5\"]} \
Resume: {resume_text}";
