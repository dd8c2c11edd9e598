//! Fixed sample articles shown when the first page cannot be loaded.

use super::types::Article;

#[allow(clippy::too_many_arguments)]
fn sample(
    n: u8,
    title: &str,
    excerpt: &str,
    category: &str,
    author: &str,
    date: &str,
    image: &str,
    read_time: &str,
    source_url: &str,
) -> Article {
    Article {
        id: format!("fallback-{n}"),
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        category: category.to_string(),
        author: author.to_string(),
        date: date.to_string(),
        image_url: format!(
            "https://images.unsplash.com/photo-{image}?auto=format&fit=crop&q=80&w=800"
        ),
        read_time: read_time.to_string(),
        url: "#".to_string(),
        source_url: Some(source_url.to_string()),
    }
}

/// The five hardcoded articles that keep the first screen from being empty.
pub fn fallback_articles() -> Vec<Article> {
    vec![
        sample(
            1,
            "Reativo Motta cria armadilha para Lula em sua busca por surfar a onda da segurança pública",
            "Análise política sobre os movimentos recentes do governo na área de segurança pública e seus impactos.",
            "Política",
            "Estadão",
            "10 Nov 2025",
            "1541872703-74c5963631df",
            "5 min",
            "https://estadao.com.br",
        ),
        sample(
            2,
            "Novo PS6: Rumores e expectativas para o lançamento em 2026",
            "Sony prepara terreno para a próxima geração de consoles com hardware revolucionário.",
            "Jogos",
            "IGN Brasil",
            "12 Nov 2025",
            "1486401899868-0e435ed85128",
            "4 min",
            "#",
        ),
        sample(
            3,
            "Dólar atinge nova cotação histórica com incertezas no mercado global",
            "Moeda americana sobe diante de novos dados de inflação nos Estados Unidos.",
            "Economia",
            "InfoMoney",
            "12 Nov 2025",
            "1611974765270-ca1258634369",
            "3 min",
            "#",
        ),
        sample(
            4,
            "Microsoft revela detalhes de sua busca por superinteligência após acordo com a OpenAI",
            "Parceria visa acelerar o desenvolvimento de AGI segura e benéfica para a humanidade.",
            "Tecnologia",
            "Cryptopolitan",
            "06 Nov 2025",
            "1620712943543-bcc4688e7485",
            "6 min",
            "#",
        ),
        sample(
            5,
            "Verstappen Escapa de Suspensão: Uma Mudança de Jogo na F1",
            "Decisão da FIA gera polêmica nos bastidores e pode definir o campeonato.",
            "Esportes",
            "SAPO",
            "27 Oct 2025",
            "1574516709324-747d6d542034",
            "4 min",
            "#",
        ),
    ]
}
