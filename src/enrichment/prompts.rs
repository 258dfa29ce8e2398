//! Prompt templates. All answers are requested in Brazilian Portuguese.

pub fn weather_prompt(lat: f64, lng: f64, nonce: i64) -> String {
    format!(
        "Pesquise no Google o clima atual (temperatura e condições) para a localização \
         latitude {lat}, longitude {lng}. Se não houver resultado para as coordenadas exatas, \
         use a cidade ou localidade mais próxima. Responda de forma breve, em português. \
         (Referência: {nonce})"
    )
}

pub fn analysis_prompt(text: &str, weather: &str, captured_at: &str) -> String {
    format!(
        r#"Analise esta memória registrada em {captured_at}.
Texto: "{text}"
Clima no momento: "{weather}"

Responda em português do Brasil com um JSON contendo:
1. mood: uma palavra para a emoção predominante.
2. colorHex: um código de cor hexadecimal que represente o sentimento.
3. musicVibe: um gênero ou descrição musical que combine com o momento (ex.: "Lo-fi Melancólico", "Rock Anos 80").
4. tags: de 3 a 5 palavras-chave.
5. poeticSummary: uma única frase poética que capture a essência da memória.
6. weatherParsed: o clima resumido em poucas palavras (ex.: "24°C, Ensolarado")."#
    )
}

pub fn image_prompt(text: &str, mood: &str, weather: &str) -> String {
    format!(
        "Imagem artística de alta qualidade, levemente abstrata e nostálgica, que represente \
         esta memória.\n\
         Cena: {text}\n\
         Atmosfera: {mood}, {weather}.\n\
         Estilo: cinematográfico, luz suave, como um sonho vívido ou uma fotografia de diário.\n\
         Nenhum texto na imagem."
    )
}
