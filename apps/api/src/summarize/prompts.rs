// Summarization prompt fragments.
// The model sees one combined prompt: framing, then user instructions, then transcript.

pub const SUMMARY_FRAMING: &str = "\
You are an expert meeting assistant. Your task is to generate a clear, concise, and professional summary of the following meeting transcript.

**Instructions:**
- Always format your output in Markdown.
- Use appropriate Markdown headings, bullet points, and bold for names or key items.
- Clearly separate sections such as Key Decisions, Action Items (with owners and deadlines), Discussion Points, and Next Steps.
- If the transcript is incomplete or contains errors, politely mention it.
- Do not include any content outside the summary.
- Follow any additional user instructions below.";

/// Returned when the model answers without any text.
pub const EMPTY_SUMMARY_FALLBACK: &str = "No summary generated.";

pub fn build_summary_prompt(transcript: &str, instruction: &str) -> String {
    format!(
        "{SUMMARY_FRAMING}\n\n**User Instructions:** {instruction}\n\n**Meeting Transcript:**\n{transcript}"
    )
}
