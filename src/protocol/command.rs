#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    TermsList,
    TermsSave,
    TermsDelete,
    TermsSetHard,
    GlossarySearch,
    GlossaryCategories,
    ProgressSummary,
    DeckBuild,
    ReportsSubmit,
    ReportsList,
    ReportsResolve,
    QuizGenerate,
    SpeechSynthesize,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "terms.list" => Command::TermsList,
            "terms.save" => Command::TermsSave,
            "terms.delete" => Command::TermsDelete,
            "terms.set_hard" => Command::TermsSetHard,
            "glossary.search" => Command::GlossarySearch,
            "glossary.categories" => Command::GlossaryCategories,
            "progress.summary" => Command::ProgressSummary,
            "deck.build" => Command::DeckBuild,
            "reports.submit" => Command::ReportsSubmit,
            "reports.list" => Command::ReportsList,
            "reports.resolve" => Command::ReportsResolve,
            "quiz.generate" => Command::QuizGenerate,
            "speech.synthesize" => Command::SpeechSynthesize,
            _ => Command::Unknown,
        }
    }
}
