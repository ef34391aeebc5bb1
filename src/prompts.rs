//! Persona and instruction templates for contract analysis.
//!
//! The summary's sections (parties, obligations, risk flags, ...) are defined
//! only here. Reword a template and bump [`TEMPLATE_VERSION`]; tests below
//! render every locale offline.
//!
//! Templates carry one named slot, [`CONTRACT_TEXT_SLOT`], which
//! [`render_instructions`] replaces with the extracted contract text.

use crate::config::PromptLocale;

/// Bumped whenever the wording or structure of a template changes.
pub const TEMPLATE_VERSION: u32 = 1;

/// Placeholder replaced by the extracted contract text.
pub const CONTRACT_TEXT_SLOT: &str = "{contract_text}";

/// Marker that opens the embedded contract text.
pub const BEGIN_MARKER: &str = "--- BEGIN CONTRACT TEXT ---";

/// Marker that closes the embedded contract text.
pub const END_MARKER: &str = "--- END CONTRACT TEXT ---";

/// System persona, English.
pub const SYSTEM_PERSONA_EN: &str = "You are a legal AI assistant.";

/// System persona, Bahasa Indonesia.
pub const SYSTEM_PERSONA_ID: &str = "Anda adalah asisten legal AI.";

/// Instruction template, English.
pub const CONTRACT_ANALYSIS_TEMPLATE_EN: &str = r#"You are a meticulous legal AI assistant and an expert in analysing legal documents.
Your task is to analyse the following contract text and provide a clear, structured summary.

Identify and explain the following points from the contract text below:

1.  **Parties Involved**: Identify every party named in the contract and their role.
2.  **Executive Summary**: Give a short summary (2-3 sentences) of the main purpose of this contract.
3.  **Key Clauses**:
    *   **Main Obligations**: What are the main obligations of each party?
    *   **Term**: When does the contract start and end, and what are the renewal conditions?
    *   **Payment Terms**: How, when and how much must be paid?
    *   **Confidentiality**: Is there a confidentiality clause? If so, summarise it briefly.
    *   **Dispute Resolution**: How will disputes be resolved under this contract (mediation, arbitration, courts)?
    *   **Termination**: Under what conditions may either party terminate the contract?
4.  **Potential Risks or Grey Areas**: Identify clauses that may be ambiguous, unusual or potentially harmful to one of the parties. Give brief suggestions where appropriate.

Use Markdown formatting for a tidy answer.

--- BEGIN CONTRACT TEXT ---
{contract_text}
--- END CONTRACT TEXT ---"#;

/// Instruction template, Bahasa Indonesia.
pub const CONTRACT_ANALYSIS_TEMPLATE_ID: &str = r#"Anda adalah seorang asisten legal AI yang sangat teliti dan ahli dalam menganalisis dokumen hukum.
Tugas Anda adalah untuk menganalisis teks kontrak berikut dan memberikan ringkasan yang jelas dan terstruktur.

Tolong identifikasi dan jelaskan poin-poin berikut dari teks kontrak di bawah ini:

1.  **Para Pihak yang Terlibat**: Identifikasi semua pihak yang disebutkan dalam kontrak beserta peran mereka.
2.  **Ringkasan Eksekutif**: Berikan ringkasan singkat (2-3 kalimat) mengenai tujuan utama dari kontrak ini.
3.  **Klausul-Klausul Penting**:
    *   **Kewajiban Utama**: Apa saja kewajiban utama dari masing-masing pihak?
    *   **Jangka Waktu**: Kapan kontrak ini dimulai, berakhir, dan apa saja ketentuan perpanjangannya?
    *   **Ketentuan Pembayaran**: Bagaimana, kapan, dan berapa jumlah pembayaran yang harus dilakukan?
    *   **Kerahasiaan (Confidentiality)**: Apakah ada klausul kerahasiaan? Jika ya, jelaskan secara singkat.
    *   **Penyelesaian Sengketa (Dispute Resolution)**: Bagaimana sengketa akan diselesaikan menurut kontrak ini (mediasi, arbitrase, pengadilan)?
    *   **Pengakhiran Kontrak (Termination)**: Apa saja kondisi yang memungkinkan salah satu pihak untuk mengakhiri kontrak?
4.  **Potensi Risiko atau Area Abu-abu**: Identifikasi klausul yang mungkin ambigu, tidak biasa, atau berpotensi merugikan salah satu pihak. Berikan saran singkat jika ada.

Gunakan format Markdown untuk jawaban yang rapi.

--- BEGIN CONTRACT TEXT ---
{contract_text}
--- END CONTRACT TEXT ---"#;

/// The built-in system persona for `locale`.
pub fn system_persona(locale: PromptLocale) -> &'static str {
    match locale {
        PromptLocale::English => SYSTEM_PERSONA_EN,
        PromptLocale::Indonesian => SYSTEM_PERSONA_ID,
    }
}

/// The raw instruction template for `locale`, slot not yet filled.
pub fn instruction_template(locale: PromptLocale) -> &'static str {
    match locale {
        PromptLocale::English => CONTRACT_ANALYSIS_TEMPLATE_EN,
        PromptLocale::Indonesian => CONTRACT_ANALYSIS_TEMPLATE_ID,
    }
}

/// Fill the template's contract-text slot with `contract_text`.
///
/// The text is inserted verbatim; a slot-like string inside the contract
/// itself is left alone.
pub fn render_instructions(locale: PromptLocale, contract_text: &str) -> String {
    let template = instruction_template(locale);
    match template.split_once(CONTRACT_TEXT_SLOT) {
        Some((head, tail)) => {
            let mut out = String::with_capacity(template.len() + contract_text.len());
            out.push_str(head);
            out.push_str(contract_text);
            out.push_str(tail);
            out
        }
        None => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCALES: [PromptLocale; 2] = [PromptLocale::English, PromptLocale::Indonesian];

    #[test]
    fn every_template_has_one_slot_between_markers() {
        for locale in LOCALES {
            let t = instruction_template(locale);
            assert_eq!(t.matches(CONTRACT_TEXT_SLOT).count(), 1, "{locale:?}");
            let begin = t.find(BEGIN_MARKER).expect("begin marker");
            let slot = t.find(CONTRACT_TEXT_SLOT).unwrap();
            let end = t.find(END_MARKER).expect("end marker");
            assert!(begin < slot && slot < end, "{locale:?}");
        }
    }

    #[test]
    fn english_template_covers_every_section() {
        let t = CONTRACT_ANALYSIS_TEMPLATE_EN;
        for needle in [
            "Parties Involved",
            "Executive Summary",
            "2-3 sentences",
            "Main Obligations",
            "Term",
            "Payment Terms",
            "Confidentiality",
            "Dispute Resolution",
            "Termination",
            "Potential Risks",
            "Markdown",
        ] {
            assert!(t.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn render_inserts_text_verbatim() {
        let text = "Clause 1. {contract_text} is not a slot here.\n\tIndented.";
        let rendered = render_instructions(PromptLocale::English, text);
        assert!(rendered.contains(&format!("{BEGIN_MARKER}\n{text}\n{END_MARKER}")));
        assert!(!rendered.starts_with(CONTRACT_TEXT_SLOT));
        assert_eq!(rendered.matches(BEGIN_MARKER).count(), 1);
    }

    #[test]
    fn personas_differ_by_locale() {
        assert_eq!(system_persona(PromptLocale::English), "You are a legal AI assistant.");
        assert_eq!(system_persona(PromptLocale::Indonesian), "Anda adalah asisten legal AI.");
    }
}
