//! Prompt construction for the outline generation request.
//!
//! [`build_prompt`] turns a frozen [`EpisodeInputs`] record into the
//! Spanish producer brief sent to the generation service. It is plain
//! string interpolation over already-validated fields: pure,
//! deterministic, and incapable of failing.
//!
//! The brief pins down everything the parser later relies on: exactly five
//! bold-titled sections in a fixed order, an estimated duration per title,
//! numbered non-question idea lists, the exact opening phrase of the intro,
//! the closing section's mandatory content, and no prose outside the list
//! structure.

use crate::models::EpisodeInputs;

/// The exact phrase the intro section must open with.
pub const INTRO_OPENING: &str = "Bienvenidos a Altavoz, el vodcast de la Escuela de Diseño";

/// Build the generation prompt for an episode.
///
/// Every field of `inputs` is embedded verbatim at least once. Given
/// identical inputs the result is byte-for-byte identical.
pub fn build_prompt(inputs: &EpisodeInputs) -> String {
    let EpisodeInputs {
        specialization,
        host_name,
        host_role,
        guest_name,
        guest_hit,
        episode_title,
        section1,
        section2,
        section3,
    } = inputs;

    format!(
        r#"Actúa como un productor de podcast experto en generar ideas. Tu tono debe ser empático y asertivo, con el objetivo de inspirar una conversación profunda y significativa. Tu misión es generar una lluvia de ideas en formato de lista para una pauta de conversación. El resultado no debe ser un guion en prosa, sino una lista de tópicos y conceptos clave que sirvan como disparadores.

**Contexto del Episodio:**
*   **Anfitrión:** {host_name}, que representa a "{host_role}".
*   **Invitado/a:** {guest_name}, una persona experta en {specialization}.
*   **El "Hit" del Invitado/a:** {guest_name} es conocido/a por su trabajo en "{guest_hit}". Este es un punto clave.
*   **Título del Episodio:** "{episode_title}"

**Estructura Temática del Programa (definida por el anfitrión):**
*   **Sección 1:** "{section1}"
*   **Sección 2:** "{section2}"
*   **Sección 3:** "{section3}"

**Tus Instrucciones:**
1.  **Primero, crea una sección "Intro" de 1 a 3 minutos.** Debe comenzar EXACTAMENTE con la frase: "{intro_opening}". Luego, debe presentar al anfitrión, {host_name}, mencionando el departamento que representa, "{host_role}", y finalmente presentar de forma cálida al invitado/a.
2.  **Genera una pauta de ideas para un podcast de 30 a 45 minutos en total.** Distribuye el tiempo de forma lógica entre la intro, las 3 secciones temáticas y el cierre.
3.  **Estructura la respuesta en el siguiente orden:** "Intro", "{section1}", "{section2}", "{section3}", y "Cierre".
4.  **Indica el minutaje APROXIMADO para CADA sección.** Por ejemplo: **Intro (1-3 minutos)**, **{section1} (10-15 minutos)**, **Cierre (1-2 minutos)**.
5.  **Dentro de cada sección, crea una lista numerada de ideas clave para la conversación.** NO uses preguntas completas. Deben ser conceptos o temas concisos que sirvan como disparadores para un diálogo espontáneo.
6.  **En la sección de "Cierre", incluye estos puntos:**
    *   Agradecimiento final a {guest_name}.
    *   Invitación a seguir las redes sociales del departamento del anfitrión ("{host_role}"), las redes del invitado/a ({guest_name}) y las de la Escuela de Diseño.
    *   Llamada a la acción: invitar a suscribirse para más contenidos y compartir el episodio.
7.  **Relaciona las ideas directamente con el "Hit" del invitado ({guest_hit}) y la experiencia del anfitrión ({host_role}).** Busca conexiones significativas.
8.  **Mantén un tono empático y asertivo en las ideas propuestas.**

**Formato de la Respuesta (MUY IMPORTANTE):**
Usa Markdown para la estructura, con los títulos de sección en negrita. Devuelve ÚNICAMENTE la pauta de ideas en formato de lista. No agregues saludos, explicaciones, ni prosa introductoria o de cierre.

**Ejemplo de formato esperado:**

**Intro (1-3 minutos)**
1. Saludo inicial: "{intro_opening}".
2. Presentación del anfitrión: {host_name}, en representación de "{host_role}".
3. Presentación de {guest_name}, destacar la importancia de su "hit" ("{guest_hit}") en {specialization}.

**{section1} (10-15 minutos)**
1. Orígenes de {guest_name} en "{section1}", conectándolo con su proyecto "{guest_hit}".
2. Perspectiva de {host_name} desde su experiencia en {host_role} sobre este tema.
3. Aprendizajes clave en los inicios de una carrera en {specialization}.

**{section2} (15-20 minutos)**
1. Principales desafíos en "{guest_hit}" relacionados con el tema "{section2}".
2. Anécdota o lección aprendida de {host_name} desde su rol en "{host_role}".
3. Tópico clave sobre {section2}.

**{section3} (5-10 minutos)**
1. Visión a futuro: "{section3}" y el "hit".
2. Reflexión final sobre el impacto de "{section3}".

**Cierre (1-2 minutos)**
1. Agradecimientos a {guest_name} por su tiempo y perspectiva.
2. Llamada a la acción: "No olviden seguir las redes de '{host_role}', de {guest_name} y de la Escuela de Diseño".
3. Recordatorio: "Suscríbanse para más contenidos y compartan si les gustó".
"#,
        intro_opening = INTRO_OPENING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_inputs() -> EpisodeInputs {
        EpisodeInputs {
            specialization: "Diseño Gráfico".to_string(),
            host_name: "Pancho Malo".to_string(),
            host_role: "Diseñador de Nada".to_string(),
            guest_name: "Javiera Mena".to_string(),
            guest_hit: "El rediseño de la app del banco".to_string(),
            episode_title: "Diseñar sin permiso".to_string(),
            section1: "Orígenes".to_string(),
            section2: "El proceso".to_string(),
            section3: "Futuro".to_string(),
        }
    }

    #[test]
    fn test_prompt_contains_every_field_verbatim() {
        let inputs = sample_inputs();
        let prompt = build_prompt(&inputs);

        for value in [
            inputs.specialization.as_str(),
            inputs.host_name.as_str(),
            inputs.host_role.as_str(),
            inputs.guest_name.as_str(),
            inputs.guest_hit.as_str(),
            inputs.episode_title.as_str(),
            inputs.section1.as_str(),
            inputs.section2.as_str(),
            inputs.section3.as_str(),
        ] {
            assert!(prompt.contains(value), "prompt missing field value: {value}");
        }
    }

    #[test]
    fn test_prompt_contains_fixed_opening_phrase() {
        let prompt = build_prompt(&sample_inputs());
        assert!(prompt.contains(INTRO_OPENING));
    }

    #[test]
    fn test_prompt_orders_sections() {
        let inputs = sample_inputs();
        let prompt = build_prompt(&inputs);
        let order_line = format!(
            r#""Intro", "{}", "{}", "{}", y "Cierre""#,
            inputs.section1, inputs.section2, inputs.section3
        );
        assert!(prompt.contains(&order_line));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let inputs = sample_inputs();
        assert_eq!(build_prompt(&inputs), build_prompt(&inputs));
    }
}
