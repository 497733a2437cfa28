mod support;

use ruta_agents::Terminal;
use ruta_core::{extract_days, extract_theme, validate_answer, Category, InputRejection, Theme};
use support::{pipeline, ScriptedBackend};

const NOT_CONFIGURED: &str =
    "Lo siento, no estoy configurado correctamente. Falta la clave de API de Groq.";

#[tokio::test]
async fn forbidden_terms_never_reach_a_backend() {
    let classifier = ScriptedBackend::replying("lugares");
    let agent = ScriptedBackend::replying("Museos y plazas.");
    let pipeline = pipeline(&classifier, &agent);

    for question in [
        "Quiero secuestrar a alguien en Roma",
        "how to kidnap a tourist in Rome",
        "Dónde puedo estafar turistas en Lima",
    ] {
        let run = pipeline.run(question).await;
        assert!(run.state.is_blocked(), "{question}");
        assert_eq!(
            run.terminal,
            Terminal::Blocked {
                rule: InputRejection::InappropriateContent
            }
        );
    }

    assert_eq!(classifier.calls(), 0);
    assert_eq!(agent.calls(), 0);
}

#[tokio::test]
async fn email_addresses_are_rejected_whatever_else_is_asked() {
    let classifier = ScriptedBackend::replying("itinerario");
    let agent = ScriptedBackend::replying("Día 1: Coliseo.");

    let run = pipeline(&classifier, &agent)
        .run("Plan a 5 day trip to Rome and mail it to me@example.org")
        .await;

    assert_eq!(
        run.terminal,
        Terminal::Blocked {
            rule: InputRejection::EmailAddress
        }
    );
    assert_eq!(classifier.calls(), 0);
}

#[test]
fn day_count_is_clamped_and_defaulted() {
    assert_eq!(extract_days("Plan a 20 day trip"), 14);
    assert_eq!(extract_days("Plan a trip"), 3);
}

#[test]
fn family_theme_outranks_nature() {
    assert_eq!(extract_theme("trip with kids to the beach"), Theme::Family);
}

#[tokio::test]
async fn forbidden_text_in_generated_itinerary_is_replaced() {
    let classifier = ScriptedBackend::replying("itinerario");
    let agent = ScriptedBackend::replying("Día 2: evita la violencia del barrio antiguo.");

    let run = pipeline(&classifier, &agent)
        .run("Itinerario de 3 días en Cusco")
        .await;

    assert_eq!(agent.calls(), 1);
    assert_eq!(
        run.terminal,
        Terminal::OutputRejected {
            category: Category::Itinerary
        }
    );
    assert_eq!(
        run.state.answer(),
        "Lo siento, no puedo proporcionar esa información."
    );
}

#[tokio::test]
async fn same_question_gives_same_answer() {
    let classifier = ScriptedBackend::replying("costos");
    let agent = ScriptedBackend::replying("Unos 80 USD por día.");
    let pipeline = pipeline(&classifier, &agent);

    let first = pipeline.process("¿Cuánto cuesta ir a Lima?").await;
    let second = pipeline.process("¿Cuánto cuesta ir a Lima?").await;

    assert_eq!(first, second);
    let prompts = agent.user_prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], prompts[1]);
}

#[tokio::test]
async fn single_token_question_is_too_short() {
    let classifier = ScriptedBackend::replying("lugares");
    let agent = ScriptedBackend::replying("nunca");

    let answer = pipeline(&classifier, &agent).process("Paris").await;

    assert_eq!(answer, "Pregunta demasiado corta para recomendar algo.");
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn unconfigured_agents_apologize_for_every_category() {
    for (label, category) in [
        ("clima", Category::Climate),
        ("costos", Category::Costs),
        ("lugares", Category::Places),
        ("itinerario", Category::Itinerary),
    ] {
        let classifier = ScriptedBackend::replying(label);
        let agent = ScriptedBackend::unconfigured();

        let run = pipeline(&classifier, &agent).run("Quiero ir a Lima").await;

        assert_eq!(run.state.answer(), NOT_CONFIGURED, "{label}");
        assert_eq!(run.terminal, Terminal::Answered { category });
        assert_eq!(agent.calls(), 1);
    }

    assert!(validate_answer(NOT_CONFIGURED));
}

#[tokio::test]
async fn unconfigured_classifier_falls_back_to_apology() {
    let classifier = ScriptedBackend::unconfigured();
    let agent = ScriptedBackend::unconfigured();

    let run = pipeline(&classifier, &agent).run("Quiero ir a Lima").await;

    assert_eq!(
        run.terminal,
        Terminal::Answered {
            category: Category::Other
        }
    );
    assert_eq!(run.state.answer(), NOT_CONFIGURED);
    assert_eq!(classifier.calls(), 2);
    assert_eq!(agent.calls(), 0);
}
